use crate::utils::error::Result;
use async_trait::async_trait;

/// 整份檔案讀寫；路徑相對於資料目錄
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 通知通道：送出一段已格式化的文字
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}

/// Supplies one `User-Agent` value per outbound request.
pub trait UserAgentSource: Send + Sync {
    fn next_user_agent(&self) -> String;
}
