use metar_processor::processors::StationProcessor;
use metar_processor::utils::constants::CSV_HEADER;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, lines: &[&str]) {
    let mut file = std::fs::File::create(dir.join(name)).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
}

#[test]
fn test_station_directory_to_csv() {
    let data_root = TempDir::new().expect("Failed to create temp directory");
    let station_dir = data_root.path().join("mroc");
    std::fs::create_dir(&station_dir).unwrap();

    write_file(
        &station_dir,
        "2024-01.txt",
        &[
            "202401011200 MROC 011200Z 10005KT CAVOK 25/18 A2992=",
            "202401011300 MROC 011300Z NIL=",
            "202401011400 MROC 011400Z 12008KT 8000 -RA SCT030CB BKN070 24/19 A2990=",
        ],
    );
    write_file(
        &station_dir,
        "2024-02.txt",
        &[
            "202402011200 MROC 011200Z VRB02KT 9999 FEW035 27/16 A2994=",
            "202402011300 MROC 011300Z NIL=",
        ],
    );

    let processor = StationProcessor::new().with_silent(true);
    let summary = processor.process(&station_dir).unwrap();

    assert_eq!(summary.files, 2);
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.nil_skipped, 2);

    let csv_path = station_dir.join("metars.csv");
    assert!(csv_path.exists());

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let headers: Vec<&str> = headers.iter().collect();
    assert_eq!(headers, CSV_HEADER.to_vec());

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    // Row count equals input lines minus NIL lines
    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record.len(), 30);
    }

    // File-then-line order: January rows before February
    assert_eq!(&records[0][1], "1");
    assert_eq!(&records[1][1], "1");
    assert_eq!(&records[2][1], "2");

    // Second January row carries the decoded weather and cloud columns
    let rainy = &records[1];
    assert_eq!(&rainy[5], "MROC");
    assert_eq!(&rainy[9], "8000.0");
    assert_eq!(&rainy[10], "0");
    assert_eq!(&rainy[11], "light");
    assert_eq!(&rainy[13], "RA");
    assert_eq!(&rainy[15], "SCT");
    assert_eq!(&rainy[16], "3000.0");
    assert_eq!(&rainy[17], "CB");
    assert_eq!(&rainy[18], "BKN");
    // Slots 3 and 4 are padded
    assert_eq!(&rainy[21], "null");
    assert_eq!(&rainy[24], "null");
}

#[test]
fn test_cavok_example_row() {
    let data_root = TempDir::new().unwrap();
    let station_dir = data_root.path().join("mroc");
    std::fs::create_dir(&station_dir).unwrap();

    write_file(
        &station_dir,
        "2024-01.txt",
        &["202401011200 MROC 011200Z 10005KT CAVOK 25/18 A2992="],
    );

    StationProcessor::new()
        .with_silent(true)
        .process(&station_dir)
        .unwrap();

    let content = std::fs::read_to_string(station_dir.join("metars.csv")).unwrap();
    let row = content.lines().nth(1).unwrap();

    assert_eq!(
        row,
        "2024,1,1,12,0,MROC,100.0,5.0,null,10000.0,1,\
         null,null,null,null,\
         null,null,null,null,null,null,null,null,null,null,null,null,\
         25.0,18.0,29.92"
    );
    assert!(content.ends_with('\n'));
}

#[test]
fn test_nil_only_file_produces_empty_csv() {
    let data_root = TempDir::new().unwrap();
    let station_dir = data_root.path().join("mroc");
    std::fs::create_dir(&station_dir).unwrap();

    write_file(
        &station_dir,
        "2024-01.txt",
        &[
            "202401010000 MROC 010000Z NIL=",
            "202401010100 MROC 010100Z NIL=",
        ],
    );

    let summary = StationProcessor::new()
        .with_silent(true)
        .process(&station_dir)
        .unwrap();

    assert_eq!(summary.rows, 0);
    assert_eq!(summary.nil_skipped, 2);

    let content = std::fs::read_to_string(station_dir.join("metars.csv")).unwrap();
    assert_eq!(content.lines().count(), 1); // header only
}

#[test]
fn test_output_is_reproducible() {
    let data_root = TempDir::new().unwrap();
    let station_dir = data_root.path().join("mroc");
    std::fs::create_dir(&station_dir).unwrap();

    write_file(
        &station_dir,
        "2024-01.txt",
        &[
            "202401011200 MROC 011200Z 10005KT 9999 VCSH FEW030 SCT070 25/18 Q1013=",
            "202401011300 MROC 011300Z 10005KT 0800 FG VV002 14/14 Q1018=",
        ],
    );

    let processor = StationProcessor::new().with_silent(true);
    processor.process(&station_dir).unwrap();
    let first = std::fs::read_to_string(station_dir.join("metars.csv")).unwrap();

    processor.process(&station_dir).unwrap();
    let second = std::fs::read_to_string(station_dir.join("metars.csv")).unwrap();

    assert_eq!(first, second);
}
