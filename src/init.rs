use env_logger::{Builder, Env};

/// 初始化日誌，未設定 `RUST_LOG` 時只輸出警告以上的訊息
pub fn init() {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();
}
