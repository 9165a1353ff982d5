use csv::{ReaderBuilder, StringRecord};
use shared::models::RawRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::EngineError;

pub struct SpendCsvParser;

impl SpendCsvParser {
    // No header row. Example row:
    // TRX0001;P0001;1;BUDI SANTOSO;15/03/2025;dr. Sari;FARMASI;POLI ANAK;BPJS;1.539.800,00;0;N
    pub fn load_records_from_csv<P: AsRef<Path>>(file_path: P) -> Result<Vec<RawRecord>, EngineError> {
        let file = File::open(file_path.as_ref())?;
        Self::load_records_from_reader(BufReader::new(file))
    }

    /// Reads every row, failing the whole load on the first row whose column
    /// count is not [`RawRecord::COLUMN_COUNT`].
    pub fn load_records_from_reader<R: Read>(reader: R) -> Result<Vec<RawRecord>, EngineError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true) // Column count is checked below to report a precise error
            .from_reader(reader);

        let mut records = Vec::new();
        for result in rdr.records() {
            let record = result?;
            if record.len() != RawRecord::COLUMN_COUNT {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                return Err(EngineError::ColumnCount {
                    line,
                    expected: RawRecord::COLUMN_COUNT,
                    found: record.len(),
                });
            }
            records.push(Self::to_raw_record(&record));
        }

        if records.is_empty() {
            return Err(EngineError::EmptySource);
        }
        Ok(records)
    }

    fn to_raw_record(record: &StringRecord) -> RawRecord {
        let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
        RawRecord {
            transaction_id: field(0),
            patient_id: field(1),
            sequence_no: field(2),
            patient_name: field(3),
            date: field(4),
            provider: field(5),
            service_type: field(6),
            department: field(7),
            payment_source: field(8),
            cost: field(9),
            discount: field(10),
            flag: field(11),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_records_valid_data() {
        let csv_content = "\
TRX0001;P0001;1;BUDI SANTOSO;15/03/2025;dr. Sari;FARMASI;POLI ANAK;BPJS;1.539.800,00;0;N
TRX0002;P0002;2;SITI AMINAH;16/03/2025;dr. Andi;LAB;POLI DALAM;UMUM;58,922,400.00;0;Y";
        let tmp_file = create_test_csv(csv_content);
        let records = SpendCsvParser::load_records_from_csv(tmp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].transaction_id, "TRX0001");
        assert_eq!(records[0].patient_name, "BUDI SANTOSO");
        assert_eq!(records[0].date, "15/03/2025");
        assert_eq!(records[0].department, "POLI ANAK");
        assert_eq!(records[0].cost, "1.539.800,00");
        assert_eq!(records[1].provider, "dr. Andi");
        assert_eq!(records[1].payment_source, "UMUM");
        assert_eq!(records[1].flag, "Y");
    }

    #[test]
    fn test_load_records_keeps_unparseable_fields_raw() {
        // Cleaning decides what to drop; the parser only checks the shape.
        let csv_content = "id_transaksi;id_pasien;no_urut;nama_pasien;waktu;dokter;jenis_layanan;poli;sumber_pembayaran;biaya;diskon;flag";
        let tmp_file = create_test_csv(csv_content);
        let records = SpendCsvParser::load_records_from_csv(tmp_file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cost, "biaya");
    }

    #[test]
    fn test_load_records_wrong_column_count() {
        let csv_content = "\
TRX0001;P0001;1;BUDI SANTOSO;15/03/2025;dr. Sari;FARMASI;POLI ANAK;BPJS;1.539.800,00;0;N
TRX0002;P0002;2;SITI AMINAH;16/03/2025;dr. Andi;LAB;POLI DALAM;UMUM;58,922,400.00";
        let tmp_file = create_test_csv(csv_content);
        let result = SpendCsvParser::load_records_from_csv(tmp_file.path());
        match result {
            Err(EngineError::ColumnCount { line, expected, found }) => {
                assert_eq!(line, 2);
                assert_eq!(expected, 12);
                assert_eq!(found, 10);
            }
            other => panic!("expected ColumnCount error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_records_empty_file() {
        let tmp_file = NamedTempFile::new().unwrap();
        let result = SpendCsvParser::load_records_from_csv(tmp_file.path());
        assert!(matches!(result, Err(EngineError::EmptySource)));
    }

    #[test]
    fn test_load_records_missing_file() {
        let result = SpendCsvParser::load_records_from_csv("non_existent_file.csv");
        assert!(matches!(result, Err(EngineError::IoError { .. })));
    }

    #[test]
    fn test_load_records_from_reader() {
        let data = "A;B;C;D;01/01/2025;F;G;H;I;100;0;N\n";
        let records = SpendCsvParser::load_records_from_reader(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cost, "100");
    }
}
