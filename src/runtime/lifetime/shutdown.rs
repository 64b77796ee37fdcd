use tokio::signal;
use tracing::warn;

/// 等待进程终止信号（Ctrl+C，unix 下额外监听 SIGTERM）
pub async fn listen_for_shutdown() {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
    }

    warn!("Shutdown signal received, draining in-flight requests...");
}
