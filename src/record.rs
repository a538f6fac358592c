//! Row Mapper: translation between header-keyed table rows and typed records

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fixed header row, column A through H
pub const HEADER: [&str; 8] = [
    "Employee_ID",
    "Name",
    "Department",
    "Position",
    "Status",
    "Login_Time",
    "Break_Time",
    "Last_Activity",
];

/// Status assigned to freshly created records
pub const INITIAL_STATUS: &str = "logged-out";

/// One employee attendance record
///
/// Identity is positional: a record's sheet row is derived from its index
/// within the most recent full-table scan and is never stored on the record
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub department: String,
    pub position: String,
    pub status: String,
    pub login_time: Option<String>,
    pub break_time: u32,
    pub last_activity: String,
}

impl Employee {
    /// Serialize to the fixed 8-column value tuple, column A through H
    ///
    /// Absent login time becomes the empty string; break time its decimal
    /// string form.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.department.clone(),
            self.position.clone(),
            self.status.clone(),
            self.login_time.clone().unwrap_or_default(),
            self.break_time.to_string(),
            self.last_activity.clone(),
        ]
    }
}

/// Caller-supplied fields for record creation
///
/// Everything else (status, login time, break time, last activity) is
/// assigned fixed initial values at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub id: String,
    pub name: String,
    pub department: String,
    pub position: String,
}

/// Current UTC time as an ISO-8601 string with millisecond precision
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalize a header label into its field-name key
///
/// Lower-cases the label, then drops each run of non-alphanumeric
/// separators and upper-cases the character that follows it:
/// `Login_Time` -> `loginTime`, `Employee_ID` -> `employeeId`.
pub fn normalize_header(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut upper_next = false;
    for ch in label.chars().flat_map(|c| c.to_lowercase()) {
        if ch.is_alphanumeric() {
            if upper_next {
                out.extend(ch.to_uppercase());
                upper_next = false;
            } else {
                out.push(ch);
            }
        } else {
            upper_next = true;
        }
    }
    out
}

/// Parse a full table (header row + data rows) into records
///
/// Rows whose resolved `employeeId` field is empty are dropped, not
/// reported as errors. Output order matches input row order; that order is
/// what row numbers are later derived from.
pub fn parse_table(rows: &[Vec<String>]) -> Vec<Employee> {
    let Some((header, data_rows)) = rows.split_first() else {
        return Vec::new();
    };

    let keys: Vec<String> = header.iter().map(|label| normalize_header(label)).collect();

    let mut records = Vec::with_capacity(data_rows.len());
    for (i, row) in data_rows.iter().enumerate() {
        let mut fields: HashMap<&str, &str> = HashMap::with_capacity(keys.len());
        for (key, cell) in keys.iter().zip(row.iter()) {
            fields.insert(key.as_str(), cell.as_str());
        }

        let id = fields.get("employeeId").copied().unwrap_or("");
        if id.is_empty() {
            tracing::debug!(row = i + 2, "skipping row without employee id");
            continue;
        }

        let get = |key: &str| fields.get(key).copied().unwrap_or("").to_string();

        let login_time = get("loginTime");
        let last_activity = get("lastActivity");
        let status = get("status");

        records.push(Employee {
            id: id.to_string(),
            name: get("name"),
            department: get("department"),
            position: get("position"),
            status: if status.is_empty() {
                INITIAL_STATUS.to_string()
            } else {
                status
            },
            login_time: if login_time.is_empty() {
                None
            } else {
                Some(login_time)
            },
            break_time: get("breakTime").trim().parse().unwrap_or(0),
            last_activity: if last_activity.is_empty() {
                now_timestamp()
            } else {
                last_activity
            },
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn header() -> Vec<String> {
        strings(&HEADER)
    }

    #[test]
    fn test_normalize_header_labels() {
        assert_eq!(normalize_header("Login_Time"), "loginTime");
        assert_eq!(normalize_header("Break_Time"), "breakTime");
        assert_eq!(normalize_header("Employee_ID"), "employeeId");
        assert_eq!(normalize_header("Name"), "name");
        assert_eq!(normalize_header("Last_Activity"), "lastActivity");
    }

    #[test]
    fn test_parse_single_row() {
        let rows = vec![
            header(),
            strings(&[
                "E1",
                "Ann",
                "Eng",
                "Dev",
                "working",
                "09:00",
                "5",
                "2024-01-01T00:00:00Z",
            ]),
        ];

        let records = parse_table(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            Employee {
                id: "E1".to_string(),
                name: "Ann".to_string(),
                department: "Eng".to_string(),
                position: "Dev".to_string(),
                status: "working".to_string(),
                login_time: Some("09:00".to_string()),
                break_time: 5,
                last_activity: "2024-01-01T00:00:00Z".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_empty_table() {
        assert!(parse_table(&[]).is_empty());
        assert!(parse_table(&[header()]).is_empty());
    }

    #[test]
    fn test_parse_drops_rows_without_id() {
        let rows = vec![
            header(),
            strings(&["", "Ghost", "Eng", "Dev", "working", "", "0", ""]),
            strings(&["E2", "Bob", "Ops", "SRE", "working", "", "0", ""]),
        ];

        let records = parse_table(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "E2");
    }

    #[test]
    fn test_parse_applies_defaults() {
        // Short row: only the id cell is present
        let rows = vec![header(), strings(&["E3"])];

        let records = parse_table(&rows);
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.name, "");
        assert_eq!(rec.status, INITIAL_STATUS);
        assert_eq!(rec.login_time, None);
        assert_eq!(rec.break_time, 0);
        assert!(!rec.last_activity.is_empty());
    }

    #[test]
    fn test_parse_coerces_bad_break_time() {
        let rows = vec![
            header(),
            strings(&["E4", "Cy", "Eng", "Dev", "break", "12:00", "not-a-number", "t"]),
        ];

        assert_eq!(parse_table(&rows)[0].break_time, 0);
    }

    #[test]
    fn test_row_order_preserved() {
        let rows = vec![
            header(),
            strings(&["E2", "Bob", "", "", "working", "", "0", "t"]),
            strings(&["E1", "Ann", "", "", "working", "", "0", "t"]),
        ];

        let ids: Vec<_> = parse_table(&rows).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["E2", "E1"]);
    }

    #[test]
    fn test_serialize_round_trip() {
        let original = Employee {
            id: "E9".to_string(),
            name: "Dee".to_string(),
            department: "Sales".to_string(),
            position: "AE".to_string(),
            status: "on-break".to_string(),
            login_time: None,
            break_time: 15,
            last_activity: "2024-06-01T12:30:00.000Z".to_string(),
        };

        let rows = vec![header(), original.to_row()];
        let parsed = parse_table(&rows);
        assert_eq!(parsed, vec![original]);
    }

    #[test]
    fn test_serialize_column_order() {
        let rec = Employee {
            id: "E1".to_string(),
            name: "Ann".to_string(),
            department: "Eng".to_string(),
            position: "Dev".to_string(),
            status: "working".to_string(),
            login_time: Some("09:00".to_string()),
            break_time: 5,
            last_activity: "t".to_string(),
        };

        assert_eq!(
            rec.to_row(),
            vec!["E1", "Ann", "Eng", "Dev", "working", "09:00", "5", "t"]
        );
    }

    #[test]
    fn test_serde_uses_camel_case_keys() {
        let rec = Employee {
            id: "E1".to_string(),
            name: "Ann".to_string(),
            department: "Eng".to_string(),
            position: "Dev".to_string(),
            status: "working".to_string(),
            login_time: Some("09:00".to_string()),
            break_time: 5,
            last_activity: "t".to_string(),
        };

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["loginTime"], "09:00");
        assert_eq!(json["breakTime"], 5);
        assert_eq!(json["lastActivity"], "t");
    }
}
