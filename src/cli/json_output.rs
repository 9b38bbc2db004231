//! JSON output formatting for CLI commands

use serde::Serialize;

use crate::core::ActiveVersion;
use crate::runtimes::VersionRegistry;

#[derive(Serialize)]
pub struct VersionInfo {
    pub label: String,
    pub root: String,
    pub active: bool,
}

#[derive(Serialize)]
pub struct ListResult {
    pub versions: Vec<VersionInfo>,
    pub count: usize,
    pub active: ActiveVersion,
}

impl ListResult {
    pub fn new(registry: &VersionRegistry, active: ActiveVersion) -> Self {
        let versions: Vec<VersionInfo> = registry
            .entries()
            .iter()
            .map(|e| VersionInfo {
                label: e.label.clone(),
                root: e.root_str(),
                active: active.label() == Some(e.label.as_str()),
            })
            .collect();
        Self {
            count: versions.len(),
            versions,
            active,
        }
    }
}

pub fn print_json<T: Serialize>(data: &T) {
    if let Ok(json) = serde_json::to_string_pretty(data) {
        println!("{json}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::sample_registry;

    #[test]
    fn test_list_result_marks_active() {
        let result = ListResult::new(
            &sample_registry(),
            ActiveVersion::Known("Java11".to_string()),
        );
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["count"], 3);
        assert_eq!(value["versions"][1]["label"], "Java11");
        assert_eq!(value["versions"][1]["active"], true);
        assert_eq!(value["versions"][0]["active"], false);
        assert_eq!(value["active"]["state"], "known");
        assert_eq!(value["active"]["value"], "Java11");
    }
}
