//! 课程权限模块
//!
//! 课程与作业的全部变更操作在动手前都经过这里，判定规则只有一份：
//! - 主讲教授（course.professor_id）：全部权限，含删除课程、移除学生
//! - 副教授（course.sub_professors 中列出）：管理作业、评分、答疑，
//!   不能删除课程，也不能移除其他副教授
//! - 管理员在服务入口处直接放行（见 ensure_* 系列）
//!
//! 纯函数部分对任一入参缺失一律返回 false（fail closed）。

use actix_web::HttpResponse;

use crate::models::courses::entities::Course;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};

/// 教授对课程是否有管理权限（主讲或副教授）
///
/// 任一参数缺失时返回 false。
pub fn has_permission_for_course(professor: Option<&User>, course: Option<&Course>) -> bool {
    let (professor, course) = match (professor, course) {
        (Some(p), Some(c)) => (p, c),
        _ => return false,
    };

    // 主讲教授
    if course.professor_id == professor.id {
        return true;
    }

    // 副教授
    course.has_sub_professor(professor.id)
}

/// 是否为课程的主讲教授
///
/// 任一参数缺失时返回 false。主讲身份决定课程删除权，
/// 主讲教授不能以"退出课程"的方式离开自己的课程。
pub fn is_main_professor(professor: Option<&User>, course: Option<&Course>) -> bool {
    match (professor, course) {
        (Some(p), Some(c)) => c.professor_id == p.id,
        _ => false,
    }
}

/// 服务层门禁：要求主讲/副教授身份（管理员放行）
pub fn ensure_course_permission(user: &User, course: &Course) -> Result<(), HttpResponse> {
    if user.role == UserRole::Admin {
        return Ok(());
    }

    if has_permission_for_course(Some(user), Some(course)) {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "You do not have permission to manage this course",
        )))
    }
}

/// 服务层门禁：要求主讲教授身份（管理员放行）
pub fn ensure_main_professor(user: &User, course: &Course) -> Result<(), HttpResponse> {
    if user.role == UserRole::Admin {
        return Ok(());
    }

    if is_main_professor(Some(user), Some(course)) {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "Only the main professor may perform this operation",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn professor(id: i64) -> User {
        User {
            id,
            username: format!("prof{id}"),
            email: format!("prof{id}@example.com"),
            password_hash: String::new(),
            role: UserRole::Professor,
            allowed: true,
            display_name: None,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn course(main: i64, subs: Vec<i64>) -> Course {
        Course {
            course_code: "CS101".to_string(),
            course_name: "Introduction".to_string(),
            professor_id: main,
            sub_professors: subs,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_main_professor_has_permission() {
        let p1 = professor(1);
        let c = course(1, vec![]);
        assert!(has_permission_for_course(Some(&p1), Some(&c)));
        assert!(is_main_professor(Some(&p1), Some(&c)));
    }

    #[test]
    fn test_sub_professor_has_permission_but_not_main() {
        let p2 = professor(2);
        let c = course(1, vec![2, 3]);
        assert!(has_permission_for_course(Some(&p2), Some(&c)));
        assert!(!is_main_professor(Some(&p2), Some(&c)));
    }

    #[test]
    fn test_outsider_has_no_permission() {
        let p9 = professor(9);
        let c = course(1, vec![2, 3]);
        assert!(!has_permission_for_course(Some(&p9), Some(&c)));
        assert!(!is_main_professor(Some(&p9), Some(&c)));
    }

    #[test]
    fn test_fail_closed_on_missing_arguments() {
        let p1 = professor(1);
        let c = course(1, vec![]);
        assert!(!has_permission_for_course(None, Some(&c)));
        assert!(!has_permission_for_course(Some(&p1), None));
        assert!(!has_permission_for_course(None, None));
        assert!(!is_main_professor(None, Some(&c)));
        assert!(!is_main_professor(Some(&p1), None));
    }

    #[test]
    fn test_join_then_permission_granted() {
        // P2 成为 CS101 副教授后获得管理权限，但不是主讲
        let p2 = professor(2);
        let before = course(1, vec![]);
        assert!(!has_permission_for_course(Some(&p2), Some(&before)));

        let after = course(1, vec![2]);
        assert!(has_permission_for_course(Some(&p2), Some(&after)));
        assert!(!is_main_professor(Some(&p2), Some(&after)));
    }

    #[test]
    fn test_ensure_course_permission_allows_admin() {
        let mut admin = professor(99);
        admin.role = UserRole::Admin;
        let c = course(1, vec![]);
        assert!(ensure_course_permission(&admin, &c).is_ok());
        assert!(ensure_main_professor(&admin, &c).is_ok());
    }

    #[test]
    fn test_ensure_main_professor_rejects_sub() {
        let p2 = professor(2);
        let c = course(1, vec![2]);
        assert!(ensure_course_permission(&p2, &c).is_ok());
        assert!(ensure_main_professor(&p2, &c).is_err());
    }
}
