use diary_core::storage::IntegrityReport;
use diary_core::EntryDescriptor;

pub fn descriptor_json(descriptor: &EntryDescriptor) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(descriptor)?)
}

pub fn entries_json(entries: &[EntryDescriptor]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Descriptor fields plus the decrypted body under `text`.
pub fn entry_with_text_json(descriptor: &EntryDescriptor, text: &str) -> anyhow::Result<String> {
    let mut value = serde_json::to_value(descriptor)?;
    if let Some(map) = value.as_object_mut() {
        map.insert("text".to_string(), serde_json::Value::String(text.to_string()));
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn report_json(report: &IntegrityReport) -> anyhow::Result<String> {
    let mut value = serde_json::to_value(report)?;
    if let Some(map) = value.as_object_mut() {
        map.insert("clean".to_string(), serde_json::Value::Bool(report.is_clean()));
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_entry_with_text_json() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let descriptor = EntryDescriptor::new(1704067200000, "Morning", date, "1704067200000.diary");
        let raw = entry_with_text_json(&descriptor, "Hello").unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["title"], "Morning");
        assert_eq!(value["date"], "2024-01-01T00:00:00.000Z");
        assert_eq!(value["text"], "Hello");
    }

    #[test]
    fn test_report_json_flags_clean() {
        let raw = report_json(&IntegrityReport::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["clean"], true);
    }
}
