use std::fs;

use tempfile::TempDir;

use finrag_core::corpus::Corpus;
use finrag_core::error::Error;
use finrag_core::kpi::load_kpi_summary;

const CHUNKS_CSV: &str = "\
chunk_id,source_file,chunk_text,page
c1,annual_report.txt,\"Delta reported strong revenue growth, beating guidance\",12
c2,annual_report.txt,Fuel costs increased through the year,13
c3,esg_report.txt,Our ESG targets focus on emissions reduction,2
";

#[test]
fn csv_load_preserves_row_order_and_metadata() {
    let corpus = Corpus::from_csv_reader(CHUNKS_CSV.as_bytes()).expect("load");

    assert_eq!(corpus.len(), 3);
    let ids: Vec<&str> = corpus.fragments().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, ["c1", "c2", "c3"]);

    let first = corpus.get("c1").expect("c1 present");
    assert_eq!(first.source, "annual_report.txt");
    assert_eq!(
        first.text,
        "Delta reported strong revenue growth, beating guidance"
    );
    // the extra column rides along untouched
    assert_eq!(first.meta.get("page").map(String::as_str), Some("12"));

    assert_eq!(corpus.sources(), ["annual_report.txt", "esg_report.txt"]);
}

#[test]
fn missing_required_column_is_malformed() {
    let input = "chunk_id,chunk_text\nc1,some text\n";
    let err = Corpus::from_csv_reader(input.as_bytes()).expect_err("must fail");
    match err {
        Error::MalformedCorpus(detail) => assert!(detail.contains("source_file")),
        other => panic!("expected MalformedCorpus, got {other:?}"),
    }
}

#[test]
fn duplicate_chunk_id_is_malformed() {
    let input = "\
chunk_id,source_file,chunk_text
c1,a.txt,first text
c1,a.txt,second text
";
    let err = Corpus::from_csv_reader(input.as_bytes()).expect_err("must fail");
    match err {
        Error::MalformedCorpus(detail) => assert!(detail.contains("duplicate")),
        other => panic!("expected MalformedCorpus, got {other:?}"),
    }
}

#[test]
fn empty_chunk_text_is_malformed() {
    let input = "chunk_id,source_file,chunk_text\nc1,a.txt,   \n";
    assert!(matches!(
        Corpus::from_csv_reader(input.as_bytes()),
        Err(Error::MalformedCorpus(_))
    ));
}

#[test]
fn empty_chunk_id_is_malformed() {
    let input = "chunk_id,source_file,chunk_text\n,a.txt,some text\n";
    assert!(matches!(
        Corpus::from_csv_reader(input.as_bytes()),
        Err(Error::MalformedCorpus(_))
    ));
}

#[test]
fn loads_from_a_file_on_disk() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("chunks.csv");
    fs::write(&path, CHUNKS_CSV).expect("write");

    let corpus = Corpus::from_csv_path(&path).expect("load");
    assert_eq!(corpus.len(), 3);
}

#[test]
fn kpi_summary_round_trips_from_json() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("kpi_summary.json");
    fs::write(
        &path,
        r#"{
            "total_operating_revenue": {"label": "Total Operating Revenue", "value": 61.6, "unit": "B USD"},
            "num_segments": {"label": "Reporting Segments", "value": 2},
            "esg_targets": {"label": "Key ESG Targets", "value": ["Net zero by 2050", "10% SAF by 2030"]}
        }"#,
    )
    .expect("write");

    let summary = load_kpi_summary(&path).expect("load");
    assert_eq!(summary.len(), 3);

    let revenue = &summary["total_operating_revenue"];
    assert_eq!(revenue.label, "Total Operating Revenue");
    assert_eq!(revenue.unit.as_deref(), Some("B USD"));

    let targets = &summary["esg_targets"];
    assert!(targets.unit.is_none());
    assert_eq!(targets.value.as_array().map(Vec::len), Some(2));
}
