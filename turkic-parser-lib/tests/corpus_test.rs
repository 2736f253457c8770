// Corpus tests: run a short transcription through the whole pipeline and
// compare the written analysis table.

use turkic_parser_lib::output::Row;
use turkic_parser_lib::table::{read_frequency_table, write_analysis, write_unknown};
use turkic_parser_lib::{analyze_batch, Config, FrequencyTable, Note, RowOrder};

const COURT: &str = r#"{
    "affixes": { "3POSS": ["sin"], "LOC": ["de"], "ADJ": ["gi"] },
    "grammar": { "ROOT": ["3POSS"], "3POSS": ["LOC"], "LOC": ["ADJ"] },
    "loanwords": [ { "label": "arabic", "chars": "ḥ", "substrings": ["kitab"] } ],
    "lexicon": ["ol"]
}"#;

const TEXT: &str = "\
(1) Maḥkamesindegi kitab, ol…
(2) qalam. Kitab 12
maḥkamesindegi-
";

fn analyse(table: &FrequencyTable, order: RowOrder) -> (Vec<Row>, Vec<Row>) {
    let config = Config::from_json(COURT).unwrap();
    let entries = table.sorted(order);
    let words: Vec<&str> = entries.iter().map(|e| e.word.as_str()).collect();
    let results = analyze_batch(&words, &config, 2);

    let mut rows = Vec::new();
    let mut unknown = Vec::new();
    for (entry, result) in entries.iter().zip(results) {
        let result = result.unwrap();
        let row = Row::new(entry, &result);
        if result.note == Note::Unanalyzed {
            unknown.push(row.clone());
        }
        rows.push(row);
    }
    (rows, unknown)
}

fn to_csv(rows: &[Row]) -> String {
    let mut buf = Vec::new();
    write_analysis(&mut buf, rows).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn transcription_to_analysis_table() {
    let table = FrequencyTable::from_transcription(TEXT);
    let (rows, unknown) = analyse(&table, RowOrder::FirstOccurrence);

    // "ol…" keeps its ellipsis character, so it is not the lexicon word.
    assert_eq!(
        to_csv(&rows),
        "word,root + affixes,occurrences,lines,notes\n\
         maḥkamesindegi,maḥkame + sin[3POSS] + de[LOC] + gi[ADJ],2,\"[1, 2]\",\
         Turkic morpheme pattern matching; possible arabic loanword\n\
         kitab,kitab,2,\"[1, 2]\",possible arabic loanword\n\
         ol…,ol…,1,[1],no match — treated as unanalyzed root\n\
         qalam,qalam,1,[2],no match — treated as unanalyzed root\n"
    );

    let words: Vec<_> = unknown.iter().map(|r| r.word.as_str()).collect();
    assert_eq!(words, ["ol…", "qalam"]);
}

#[test]
fn alphabetical_order() {
    let table = FrequencyTable::from_transcription(TEXT);
    let (rows, _) = analyse(&table, RowOrder::Alphabetical);
    let words: Vec<_> = rows.iter().map(|r| r.word.as_str()).collect();
    assert_eq!(words, ["kitab", "maḥkamesindegi", "ol…", "qalam"]);
}

#[test]
fn frequency_table_from_csv() {
    let csv = "word,number of occurrences,lines\n\
               ol,4,\"[1, 2, 3]\"\n\
               maḥkamesindegi,1,[3]\n";
    let table = read_frequency_table(csv.as_bytes()).unwrap();
    let (rows, unknown) = analyse(&table, RowOrder::FirstOccurrence);

    assert_eq!(rows[0].notes, "identified as short word/postposition");
    assert_eq!(rows[0].lines, "[1, 2, 3]");
    assert_eq!(rows[1].gloss, "maḥkame + sin[3POSS] + de[LOC] + gi[ADJ]");
    assert!(unknown.is_empty());

    let mut buf = Vec::new();
    write_unknown(&mut buf, &unknown).unwrap();
    assert!(buf.is_empty());
}
