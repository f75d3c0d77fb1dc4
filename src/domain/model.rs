use crate::utils::error::{DashError, Result};
use serde::{Deserialize, Serialize};

/// 下拉選單中代表「全部發射場」的值
pub const ALL_SITES: &str = "ALL";

/// One row of the launch dataset. Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,

    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,

    /// 1 = success, 0 = failure
    #[serde(rename = "class")]
    pub class: u8,

    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
}

impl LaunchRecord {
    pub fn is_success(&self) -> bool {
        self.class == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelection {
    All,
    Site(String),
}

impl SiteSelection {
    /// 解析下拉選單送來的值；空字串視為 `ALL` (下拉選單的初始值)
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL_SITES) => SiteSelection::All,
            Some(site) => SiteSelection::Site(site.to_string()),
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(DashError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.low, self.high]
    }
}
