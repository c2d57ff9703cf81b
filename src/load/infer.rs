// src/load/infer.rs
use csv::StringRecord;

/// Narrowest type every non-empty value in a column parses as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl ColumnType {
    fn widen(self, value: &str) -> ColumnType {
        match self {
            ColumnType::Integer if value.parse::<i64>().is_ok() => ColumnType::Integer,
            ColumnType::Integer | ColumnType::Float if value.parse::<f64>().is_ok() => {
                ColumnType::Float
            }
            _ => ColumnType::Text,
        }
    }
}

/// Infer a type per column from all rows. Empty cells are treated as nulls and
/// don't affect the result; an all-empty column is `Text`.
pub fn infer_column_types(width: usize, rows: &[StringRecord]) -> Vec<ColumnType> {
    (0..width)
        .map(|i| {
            let mut seen = false;
            let mut ty = ColumnType::Integer;
            for value in rows.iter().filter_map(|r| r.get(i)).map(str::trim) {
                if value.is_empty() {
                    continue;
                }
                seen = true;
                ty = ty.widen(value);
                if ty == ColumnType::Text {
                    break;
                }
            }
            if seen {
                ty
            } else {
                ColumnType::Text
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<StringRecord> {
        data.iter().map(|r| StringRecord::from(r.to_vec())).collect()
    }

    #[test]
    fn test_infer() {
        let rows = rows(&[
            &["1", "1.5", "a", "", "7"],
            &["2", "2", "b", "", "x"],
            &["", "3", "3", "", "8"],
        ]);
        assert_eq!(
            infer_column_types(5, &rows),
            vec![
                ColumnType::Integer,
                ColumnType::Float,
                ColumnType::Text,
                ColumnType::Text,
                ColumnType::Text,
            ]
        );
    }

    #[test]
    fn test_integer_then_float_widens() {
        let rows = rows(&[&["10"], &["0.25"], &["3"]]);
        assert_eq!(infer_column_types(1, &rows), vec![ColumnType::Float]);
    }
}
