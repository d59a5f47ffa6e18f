//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use dns_switch_provider::{AliyunProvider, RecordStatusProvider};

/// 凭证环境变量
pub const ACCESS_KEY_ID_VAR: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
pub const ACCESS_KEY_SECRET_VAR: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";
/// 用于切换测试的记录 ID（必须是可以被暂停的测试记录）
pub const TEST_RECORD_ID_VAR: &str = "TEST_RECORD_ID";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 测试上下文 - 封装 Provider 和测试记录
pub struct TestContext {
    pub provider: Arc<dyn RecordStatusProvider>,
    pub record_id: String,
}

impl TestContext {
    /// 创建 Aliyun 测试上下文
    pub fn aliyun() -> Option<Self> {
        let access_key_id = env::var(ACCESS_KEY_ID_VAR).ok()?;
        let access_key_secret = env::var(ACCESS_KEY_SECRET_VAR).ok()?;
        let record_id = env::var(TEST_RECORD_ID_VAR).ok()?;

        let provider = AliyunProvider::new(access_key_id, access_key_secret).ok()?;

        Some(Self {
            provider: Arc::new(provider),
            record_id,
        })
    }
}
