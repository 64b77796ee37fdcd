//! 上传文件内容与扩展名的一致性检查

/// 用文件头部的魔术字节核对扩展名
///
/// 只看第一个数据块的开头；纯文本类扩展名没有固定文件头，直接放行，
/// 白名单之外的扩展名一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    // OOXML 与 zip 同为 PK 压缩容器
    const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
    // MS Office 旧格式（OLE 复合文档）
    const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    match extension.to_lowercase().as_str() {
        ".png" => data.starts_with(&PNG_MAGIC),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),

        ".pdf" => data.starts_with(b"%PDF"),
        ".doc" | ".xls" | ".ppt" => data.starts_with(&OLE_MAGIC),
        ".docx" | ".xlsx" | ".pptx" | ".zip" => data.starts_with(&ZIP_MAGIC),

        ".7z" => data.starts_with(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]),
        ".gz" | ".gzip" => data.starts_with(&[0x1F, 0x8B]),

        ".txt" | ".md" | ".json" | ".csv" => true,

        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_pdf_magic() {
        assert!(validate_magic_bytes(b"%PDF-1.4", ".pdf"));
        assert!(!validate_magic_bytes(b"%PDF-1.4", ".doc"));
    }

    #[test]
    fn test_zip_family_shares_magic() {
        let pk = [0x50, 0x4B, 0x03, 0x04, 0x00];
        assert!(validate_magic_bytes(&pk, ".zip"));
        assert!(validate_magic_bytes(&pk, ".docx"));
    }

    #[test]
    fn test_text_files_skip_check() {
        assert!(validate_magic_bytes(b"Hello, World!", ".txt"));
        assert!(validate_magic_bytes(b"# notes", ".md"));
    }

    #[test]
    fn test_empty_data() {
        assert!(!validate_magic_bytes(&[], ".png"));
        assert!(!validate_magic_bytes(&[], ".txt"));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let data = [0x00, 0x01, 0x02, 0x03];
        assert!(!validate_magic_bytes(&data, ".exe"));
        assert!(!validate_magic_bytes(&data, ".unknown"));
    }
}
