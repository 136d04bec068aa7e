use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use contracts::inventory::record::{CellValue, ProductRecord};

use super::error::InventoryError;

/// Row-oriented tabular store: one named sheet, one CSV file whose first row
/// is the header. The header defines the record schema at read time.
///
/// Mutations are read-modify-write cycles over the whole file, serialized
/// behind `lock` so two concurrent subtracts against the same product cannot
/// lose updates. Writes go through a temp file + rename.
pub struct SheetStore {
    data_dir: PathBuf,
    sheet_name: String,
    lock: Mutex<()>,
}

struct Sheet {
    headers: Vec<String>,
    rows: Vec<ProductRecord>,
}

impl SheetStore {
    pub fn new(data_dir: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            sheet_name: sheet_name.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn sheet_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.csv", self.sheet_name))
    }

    /// All data rows in sheet order. A header-only (or zero-byte) sheet is an
    /// empty inventory, not an error; a missing sheet file is a configuration
    /// error.
    pub async fn read_all(&self) -> Result<Vec<ProductRecord>, InventoryError> {
        let _guard = self.lock.lock().await;
        Ok(self.load()?.rows)
    }

    /// Applies `mutate` to the row whose `id` column equals `product_id` and
    /// persists the sheet. Returns the updated row.
    pub async fn update_row<F>(
        &self,
        product_id: i64,
        mutate: F,
    ) -> Result<ProductRecord, InventoryError>
    where
        F: FnOnce(&mut ProductRecord) -> Result<(), InventoryError>,
    {
        let _guard = self.lock.lock().await;
        let mut sheet = self.load()?;
        let row = sheet
            .rows
            .iter_mut()
            .find(|row| row.id().map_or(false, |id| id == product_id))
            .ok_or(InventoryError::ProductNotFound(product_id))?;
        mutate(row)?;
        let updated = row.clone();
        self.persist(&sheet)?;
        Ok(updated)
    }

    fn load(&self) -> Result<Sheet, InventoryError> {
        let path = self.sheet_path();
        if !path.exists() {
            return Err(InventoryError::SheetNotFound(self.sheet_name.clone()));
        }

        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(&path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = ProductRecord::new();
            for (idx, header) in headers.iter().enumerate() {
                // short rows read as empty cells (flexible mode)
                let raw = record.get(idx).unwrap_or("");
                row.push(header.clone(), parse_cell(raw));
            }
            rows.push(row);
        }

        Ok(Sheet { headers, rows })
    }

    fn persist(&self, sheet: &Sheet) -> Result<(), InventoryError> {
        let path = self.sheet_path();
        let tmp = path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp)?;
            writer.write_record(&sheet.headers)?;
            for row in &sheet.rows {
                let cells: Vec<String> = sheet
                    .headers
                    .iter()
                    .map(|header| row.get(header).map(format_cell).unwrap_or_default())
                    .collect();
                writer.write_record(&cells)?;
            }
            writer.flush()?;
        }
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Cell text to typed value: integer, float, ISO-8601 date, then plain text.
fn parse_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return CellValue::Int(value);
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return CellValue::Float(value);
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return CellValue::Date(value.with_timezone(&Utc));
    }
    CellValue::Text(raw.to_string())
}

fn format_cell(value: &CellValue) -> String {
    value.display()
}
