use crate::db::models::Record;
use crate::errors::ApiError;
use crate::Result;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Company records in file order, indexed by exact company name
#[derive(Debug, Default)]
struct CompanyTable {
    index: HashMap<String, usize>,
    records: Vec<Record>,
}

impl CompanyTable {
    fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = CompanyTable::default();
        for row in csv_reader.deserialize::<Record>() {
            let record = row?;
            let name = record.company_name.clone();
            if table.insert(record) {
                tracing::warn!("Duplicate company {} in database, keeping the last row", name);
            }
        }
        Ok(table)
    }

    /// Returns true when an existing entry was replaced
    fn insert(&mut self, record: Record) -> bool {
        match self.index.get(&record.company_name) {
            Some(&position) => {
                self.records[position] = record;
                true
            }
            None => {
                self.index
                    .insert(record.company_name.clone(), self.records.len());
                self.records.push(record);
                false
            }
        }
    }

    fn get(&self, company_name: &str) -> Option<&Record> {
        self.index
            .get(company_name)
            .map(|&position| &self.records[position])
    }

    fn like(&self, company_name: &str) -> Option<&Record> {
        let normalized = strip_spaces(company_name);
        self.records
            .iter()
            .find(|record| strip_spaces(&record.company_name) == normalized)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

fn strip_spaces(value: &str) -> String {
    value.replace(' ', "")
}

/// Read access to the company database stored in a CSV file.
///
/// The file is loaded into memory by [`DatabaseService::connect`]; queries never touch
/// the disk. Clones share the same table.
#[derive(Clone)]
pub struct DatabaseService {
    database_file: PathBuf,
    data: Arc<RwLock<Option<CompanyTable>>>,
}

impl DatabaseService {
    pub fn new(database_file: impl AsRef<Path>) -> Self {
        Self {
            database_file: database_file.as_ref().to_path_buf(),
            data: Arc::new(RwLock::new(None)),
        }
    }

    pub fn database_file(&self) -> &Path {
        &self.database_file
    }

    /// Loads the CSV file, replacing any previously loaded data.
    /// On failure the service is left disconnected.
    pub async fn connect(&self) -> Result<usize> {
        let loaded = match tokio::fs::read(&self.database_file).await {
            Ok(content) => CompanyTable::from_reader(content.as_slice()),
            Err(err) => Err(ApiError::from(err)),
        };

        let mut data = self.data.write().await;
        match loaded {
            Ok(table) => {
                let count = table.len();
                *data = Some(table);
                tracing::info!(
                    "Loaded {} company records from {}",
                    count,
                    self.database_file.display()
                );
                Ok(count)
            }
            Err(err) => {
                *data = None;
                tracing::error!(
                    "Failed to load database {}: {}",
                    self.database_file.display(),
                    err
                );
                Err(err)
            }
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.data.read().await.is_some()
    }

    /// Number of loaded records, `None` when not connected
    pub async fn record_count(&self) -> Option<usize> {
        self.data.read().await.as_ref().map(CompanyTable::len)
    }

    /// Looks up a company by exact name, falling back to [`DatabaseService::like`]
    pub async fn query(&self, company_name: &str) -> Result<Option<Record>> {
        // both lookups must see the same table, a concurrent connect may swap it
        let data = self.data.read().await;
        let table = data.as_ref().ok_or(ApiError::DatabaseNotConnected)?;

        Ok(table
            .get(company_name)
            .or_else(|| table.like(company_name))
            .cloned())
    }

    /// Looks up a company ignoring space characters in both names.
    /// The first match in file order wins.
    #[allow(dead_code)]
    pub async fn like(&self, company_name: &str) -> Result<Option<Record>> {
        let data = self.data.read().await;
        let table = data.as_ref().ok_or(ApiError::DatabaseNotConnected)?;

        Ok(table.like(company_name).cloned())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    pub(crate) const DATABASE_CSV: &str = "Company Name,Industry,Market Capitalization,Revenue (in millions),\
EBITDA (in millions),Net Income (in millions),Debt (in millions),Equity (in millions),\
Enterprise Value (in millions),P/E Ratio,Revenue Growth Rate (%),EBITDA Margin (%),\
Net Income Margin (%),ROE (Return on Equity) (%),ROA (Return on Assets) (%),Current Ratio,\
Debt to Equity Ratio,Location
ExampleCo,Tech,5000,1500,500,200,300,2000,5200,25,10,33.33,13.33,10,5,2.0,0.15,\"San Francisco, CA\"
HealthInc,Healthcare,3000,1000,250,80,150,666,3150,15,12,40,8,13.33,10,1.5,0.25,\"New York, NY\"
Green Energy Ltd,Energy,8000,2500,900,400,1200,3000,9200,20,6,36,16,13.33,4,1.1,0.4,\"Berlin, DE\"
";

    pub(crate) fn database_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_connect_file_not_found() {
        let service = DatabaseService::new("/nonexistent/database.csv");

        assert!(service.connect().await.is_err());
        assert!(!service.is_connected().await);
        assert_eq!(service.record_count().await, None);
    }

    #[tokio::test]
    async fn test_connect_success() {
        let file = database_file(DATABASE_CSV);
        let service = DatabaseService::new(file.path());

        assert_eq!(service.connect().await.unwrap(), 3);
        assert!(service.is_connected().await);
        assert_eq!(service.record_count().await, Some(3));
    }

    #[tokio::test]
    async fn test_failed_reload_disconnects() {
        let file = database_file(DATABASE_CSV);
        let service = DatabaseService::new(file.path());
        service.connect().await.unwrap();

        std::fs::write(file.path(), "Company Name,Industry\nBroken,Row\n").unwrap();

        assert!(service.connect().await.is_err());
        assert!(!service.is_connected().await);
    }

    #[test]
    fn test_query_not_connected() {
        let service = DatabaseService::new("data/database.csv");
        let result = tokio_test::block_on(service.query("ExampleCo"));

        assert!(matches!(result, Err(ApiError::DatabaseNotConnected)));
    }

    #[tokio::test]
    async fn test_query_success() {
        let file = database_file(DATABASE_CSV);
        let service = DatabaseService::new(file.path());
        service.connect().await.unwrap();

        let record = service.query("ExampleCo").await.unwrap().unwrap();
        assert_eq!(record.company_name, "ExampleCo");
        assert_eq!(record.industry, "Tech");
        assert_eq!(record.location, "San Francisco, CA");
    }

    #[tokio::test]
    async fn test_query_ignores_spaces() {
        let file = database_file(DATABASE_CSV);
        let service = DatabaseService::new(file.path());
        service.connect().await.unwrap();

        let record = service.query("GreenEnergy Ltd").await.unwrap().unwrap();
        assert_eq!(record.company_name, "Green Energy Ltd");

        let record = service.like("Example Co").await.unwrap().unwrap();
        assert_eq!(record.company_name, "ExampleCo");
    }

    #[tokio::test]
    async fn test_like_first_match_in_file_order() {
        let content = format!(
            "{DATABASE_CSV}Example Co,Retail,100,10,1,1,1,1,1,1,1,1,1,1,1,1.0,0.1,Boston\n"
        );
        let file = database_file(&content);
        let service = DatabaseService::new(file.path());
        service.connect().await.unwrap();

        // exact names still resolve to their own rows
        let record = service.query("Example Co").await.unwrap().unwrap();
        assert_eq!(record.industry, "Retail");

        // "ExampleCo" comes first in the file
        let record = service.query("Exa mpleCo").await.unwrap().unwrap();
        assert_eq!(record.company_name, "ExampleCo");
        let record = service.like("Example Co").await.unwrap().unwrap();
        assert_eq!(record.company_name, "ExampleCo");
    }

    #[tokio::test]
    async fn test_query_nonexistent_record() {
        let file = database_file(DATABASE_CSV);
        let service = DatabaseService::new(file.path());
        service.connect().await.unwrap();

        assert!(service.query("NonExistentCo").await.unwrap().is_none());
        // matching is case sensitive
        assert!(service.query("exampleco").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_rows_last_wins() {
        let content = format!(
            "{DATABASE_CSV}ExampleCo,Software,6000,1600,500,200,300,2000,5200,25,10,33.33,13.33,10,5,2.0,0.15,Austin\n"
        );
        let file = database_file(&content);
        let service = DatabaseService::new(file.path());

        assert_eq!(service.connect().await.unwrap(), 3);
        let record = service.query("ExampleCo").await.unwrap().unwrap();
        assert_eq!(record.industry, "Software");
        assert_eq!(record.market_capitalization, 6000);
    }
}
