use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine_event::TRACKED;

pub const DEFAULT_SERVICE: &str = "http://localhost:8080";

/// 当前服务启用的插件（能力）名称，输出时以 `,` 连接
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Addons(Vec<String>);

impl Addons {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Addons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// 批次配置
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// 服务名/地址，作为信封来源的前缀
    #[builder(into, default = DEFAULT_SERVICE.to_string())]
    pub service: String,
    #[builder(default)]
    pub addons: Addons,
    /// 变量变更需携带的标签，缺失则忽略该变更
    #[builder(into, default = TRACKED.to_string())]
    pub tracked_tag: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            addons: Addons::default(),
            tracked_tag: TRACKED.to_string(),
        }
    }
}
