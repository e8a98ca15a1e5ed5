use super::normalizer::normalize_header;
use super::record::InventoryRecord;
use csv::StringRecord;
use std::io::Read;

#[derive(Debug)]
pub(crate) struct ParsedRow {
    pub(crate) line: u64,
    pub(crate) record: InventoryRecord,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ParsedRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: StringRecord = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    csv_reader.set_headers(headers.clone());

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let mut raw = result?;
        if raw.iter().all(|field| field.is_empty()) {
            continue;
        }

        let line = raw.position().map(|pos| pos.line()).unwrap_or_default();
        // Short rows read as if their trailing cells were blank.
        while raw.len() < headers.len() {
            raw.push_field("");
        }
        let record: InventoryRecord = raw.deserialize(Some(&headers))?;
        rows.push(ParsedRow { line, record });
    }

    Ok(rows)
}
