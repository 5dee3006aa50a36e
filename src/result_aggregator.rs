use crate::config::OutputConfig;
use crate::error::PipelineError;
use std::io;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub image_name: String,
    pub probability: f32,
}

/// Records in the order the walker produced them. Never sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionTable {
    records: Vec<PredictionRecord>,
}

impl PredictionTable {
    pub fn push(&mut self, record: PredictionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }
}

#[cfg(test)]
impl PredictionTable {
    pub fn probability_of(&self, image_name: &str) -> Option<f32> {
        self.records
            .iter()
            .find(|record| record.image_name == image_name)
            .map(|record| record.probability)
    }
}

/// Overwrites `config.output_path`. An empty table still gets its header row.
pub fn write(table: &PredictionTable, config: &OutputConfig) -> Result<(), PipelineError> {
    let write_error = |source: csv::Error| PipelineError::Write {
        path: config.output_path.clone(),
        source,
    };

    let file = std::fs::File::create(&config.output_path)
        .map_err(|e| write_error(csv::Error::from(e)))?;

    write_to(table, file, config).map_err(write_error)
}

pub fn write_to<W: io::Write>(
    table: &PredictionTable,
    writer: W,
    config: &OutputConfig,
) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record([&config.name_column, &config.probability_column])?;
    for record in table.records() {
        let probability = record.probability.to_string();
        writer.write_record([record.image_name.as_str(), probability.as_str()])?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn record(image_name: &str, probability: f32) -> PredictionRecord {
        PredictionRecord {
            image_name: image_name.to_string(),
            probability,
        }
    }

    fn output_config(dir: &tempfile::TempDir) -> OutputConfig {
        let mut config = Config::default().output;
        config.output_path = dir.path().join("predictions.csv");
        config
    }

    #[test]
    fn test_empty_table_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let config = output_config(&dir);

        write(&PredictionTable::default(), &config).unwrap();

        let contents = std::fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(contents, "image_name,iphone_probability\n");
    }

    #[test]
    fn test_rows_keep_table_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = output_config(&dir);
        let mut table = PredictionTable::default();
        table.push(record("zebra.jpg", 0.125));
        table.push(record("apple.png", 0.5));
        table.push(record("mango.jpeg", 0.75));

        write(&table, &config).unwrap();

        let contents = std::fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(
            contents,
            "image_name,iphone_probability\nzebra.jpg,0.125\napple.png,0.5\nmango.jpeg,0.75\n"
        );
    }

    #[test]
    fn test_line_count_is_records_plus_header() {
        let dir = tempfile::tempdir().unwrap();
        let config = output_config(&dir);
        let mut table = PredictionTable::default();
        for i in 0..17 {
            table.push(record(&format!("img_{}.jpg", i), i as f32 / 17.0));
        }

        write(&table, &config).unwrap();

        let contents = std::fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(contents.lines().count(), 18);
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let config = output_config(&dir);
        std::fs::write(&config.output_path, "stale\nrows\nfrom\nan\nold\nrun\n").unwrap();
        let mut table = PredictionTable::default();
        table.push(record("a.jpg", 0.9));

        write(&table, &config).unwrap();

        let contents = std::fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(contents, "image_name,iphone_probability\na.jpg,0.9\n");
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let mut buffer = Vec::new();
        let mut table = PredictionTable::default();
        table.push(record("shot 1, final.jpg", 0.25));

        write_to(&table, &mut buffer, &Config::default().output).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "image_name,iphone_probability\n\"shot 1, final.jpg\",0.25\n"
        );
    }

    #[test]
    fn test_missing_parent_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = output_config(&dir);
        config.output_path = dir.path().join("no_such_dir").join("predictions.csv");

        let result = write(&PredictionTable::default(), &config);

        match result {
            Err(PipelineError::Write { path, .. }) => assert_eq!(path, config.output_path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_probability_lookup_by_name() {
        let mut table = PredictionTable::default();
        table.push(record("a.jpg", 0.9));
        table.push(record("b.png", 0.2));

        assert_eq!(table.probability_of("b.png"), Some(0.2));
        assert_eq!(table.probability_of("c.gif"), None);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }
}
