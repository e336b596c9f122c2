//! CSV export of the monthly table

use std::path::Path;

use consumption_allocator_core_rs::MonthlyRow;

use crate::error::CliError;

/// Write one header row plus one row per month
pub fn write_rows(path: &Path, rows: &[MonthlyRow]) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_header_and_rows() {
        let rows = vec![
            MonthlyRow {
                ordinal: 1,
                month: "01/2025".to_string(),
                quantity: 11.0,
                value_excluding_fee: 27.896,
                fee: 6.2,
                value_including_fee: 47.536,
            },
            MonthlyRow {
                ordinal: 2,
                month: "02/2025".to_string(),
                quantity: 9.0,
                value_excluding_fee: 22.824,
                fee: 6.2,
                value_including_fee: 42.464,
            },
        ];
        let path = std::env::temp_dir().join(format!("allocation-{}.csv", std::process::id()));

        write_rows(&path, &rows).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines[0],
            "ordinal,month,quantity,value_excluding_fee,fee,value_including_fee"
        );
        assert_eq!(lines[1], "1,01/2025,11.0,27.896,6.2,47.536");
        assert_eq!(lines.len(), 3);
    }
}
