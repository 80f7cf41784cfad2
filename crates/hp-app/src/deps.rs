//! # Onboarding Dependencies / 引导流程依赖
//!
//! This module defines the dependency grouping for controller construction.
//! 此模块定义控制器构造的依赖分组。
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - Just parameter grouping / 仅用于参数打包

use std::sync::Arc;
use std::time::Duration;

use hp_core::ports::*;

/// Onboarding dependency grouping (non-Builder, just parameter grouping)
/// 引导流程依赖分组（非 Builder，仅参数打包）
///
/// All dependencies are required - no defaults, no optional fields.
/// 所有依赖都是必需的 - 无默认值，无可选字段。
#[derive(Clone)]
pub struct OnboardingDeps {
    // Remote services / 远程服务
    pub auth: Arc<dyn AuthenticationPort>,
    pub health_data: Arc<dyn HealthDataPermissionPort>,

    // Storage / 存储
    pub key_value: Arc<dyn KeyValueStorePort>,
    pub secure_storage: Arc<dyn SecureStoragePort>,

    // Presentation and routing / 展示与路由
    pub flow_manager: Arc<dyn FlowManagerPort>,
    pub events: Arc<dyn OnboardingEventPort>,

    // System / 系统
    pub clock: Arc<dyn ClockPort>,
    pub validation_debounce: Duration,
}
