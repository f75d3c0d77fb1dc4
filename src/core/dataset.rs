use crate::core::{DataSource, LaunchRecord, SiteSelection};
use crate::utils::error::{DashError, Result};
use std::collections::BTreeSet;
use std::io::Read;

/// In-memory launch table, read-only after load.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    min_payload: f64,
    max_payload: f64,
    launch_sites: Vec<String>,
}

impl LaunchTable {
    pub fn new(records: Vec<LaunchRecord>) -> Result<Self> {
        if let Some((row, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.class > 1)
        {
            return Err(DashError::ValidationError {
                message: format!(
                    "row {}: class must be 0 or 1, got {}",
                    row + 1,
                    record.class
                ),
            });
        }

        let (min_payload, max_payload) = if records.is_empty() {
            (0.0, 0.0)
        } else {
            records.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r.payload_mass_kg), hi.max(r.payload_mass_kg))
            })
        };

        // BTreeSet 保持與 group-by 相同的排序
        let launch_sites = records
            .iter()
            .map(|r| r.launch_site.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Self {
            records,
            min_payload,
            max_payload,
            launch_sites,
        })
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = csv_reader
            .deserialize::<LaunchRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Self::new(records)
    }

    pub fn from_csv_bytes(data: &[u8]) -> Result<Self> {
        Self::from_csv_reader(data)
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    pub fn launch_sites(&self) -> &[String] {
        &self.launch_sites
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.launch_sites.binary_search_by(|s| s.as_str().cmp(site)).is_ok()
    }

    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_success()).count()
    }

    pub fn filter_site(&self, selection: &SiteSelection) -> Vec<&LaunchRecord> {
        self.records.iter().filter(|r| selection.matches(r)).collect()
    }
}

/// 從資料來源下載並解析發射記錄
pub async fn load_table(source: &dyn DataSource) -> Result<LaunchTable> {
    tracing::info!("Loading launch dataset from {}", source.describe());
    let data = source.fetch().await?;
    tracing::debug!("Fetched {} bytes", data.len());

    let table = LaunchTable::from_csv_bytes(&data)?;
    tracing::info!(
        "Loaded {} launch records across {} sites (payload {} - {} kg)",
        table.len(),
        table.launch_sites().len(),
        table.min_payload(),
        table.max_payload()
    );

    if table.is_empty() {
        tracing::warn!("Launch dataset is empty, charts will have no data");
    }

    Ok(table)
}
