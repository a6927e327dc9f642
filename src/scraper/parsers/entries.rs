//! Entries table parser.

use scraper::ElementRef;

use super::{cells, selector, text_of};
use crate::error::ExtractError;
use crate::types::EntryRow;

/// Parser for `table-entries`
pub struct EntriesParser;

impl EntriesParser {
    /// Parse every horse row of an entries table.
    pub fn parse(table: &ElementRef) -> Result<Vec<EntryRow>, ExtractError> {
        let tr = selector("tr")?;
        let mut entries = Vec::new();

        for row in table.select(&tr) {
            let cols = cells(&row)?;
            // Header rows only carry <th>
            if cols.is_empty() {
                continue;
            }
            entries.push(Self::parse_row(&row, &cols)?);
        }

        Ok(entries)
    }

    fn parse_row(row: &ElementRef, cols: &[ElementRef]) -> Result<EntryRow, ExtractError> {
        let class = row
            .value()
            .attr("class")
            .and_then(|c| c.split_whitespace().next());

        let (running, program_number) = match class {
            Some("scratched") => (false, Self::scratched_program_number(&cols[0])?),
            Some(other) => return Err(ExtractError::UnrecognizedRowClass(other.to_string())),
            None => (true, Self::program_number(&cols[0])?),
        };

        let col = |i: usize| {
            cols.get(i)
                .ok_or(ExtractError::MissingElement("entries cell"))
        };
        let h4 = selector("h4")?;
        let p = selector("p")?;

        let horse_cell = col(3)?;
        let horse_name = horse_cell
            .select(&h4)
            .next()
            .map(|e| text_of(&e))
            .ok_or(ExtractError::MissingElement("horse name"))?;
        let sire = horse_cell
            .select(&p)
            .next()
            .map(|e| text_of(&e))
            .ok_or(ExtractError::MissingElement("sire"))?;

        let connections: Vec<_> = col(4)?.select(&p).collect();
        let trainer = connections
            .first()
            .map(text_of)
            .ok_or(ExtractError::MissingElement("trainer"))?;
        let jockey = connections
            .last()
            .map(text_of)
            .ok_or(ExtractError::MissingElement("jockey"))?;

        let ml_odds = col(6)?
            .select(&p)
            .next()
            .map(|e| text_of(&e))
            .ok_or(ExtractError::MissingElement("morning line odds"))?;

        Ok(EntryRow {
            running,
            program_number,
            horse_name,
            sire,
            trainer,
            jockey,
            ml_odds,
        })
    }

    /// Running horses show the saddle cloth as `<img alt="3">`.
    fn program_number(cell: &ElementRef) -> Result<u32, ExtractError> {
        let img = selector("img")?;
        let alt = cell
            .select(&img)
            .next()
            .and_then(|e| e.value().attr("alt"))
            .ok_or(ExtractError::MissingElement("program number image"))?;
        parse_program_number(alt)
    }

    /// Scratched horses carry it in `data-label="Program Number 3"`.
    fn scratched_program_number(cell: &ElementRef) -> Result<u32, ExtractError> {
        let label = cell
            .value()
            .attr("data-label")
            .ok_or(ExtractError::MissingElement("data-label"))?;
        let last = label.split_whitespace().last().unwrap_or_default();
        parse_program_number(last)
    }
}

fn parse_program_number(text: &str) -> Result<u32, ExtractError> {
    text.trim()
        .parse()
        .map_err(|_| ExtractError::InvalidNumber {
            field: "program number",
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn row(class: Option<&str>, first_cell: &str, horse: &str) -> String {
        let class_attr = class.map(|c| format!(" class=\"{c}\"")).unwrap_or_default();
        format!(
            "<tr{class_attr}>\
               {first_cell}\
               <td>PP</td>\
               <td><img src=\"silk.png\"></td>\
               <td><h4> {horse} </h4><p>Curlin</p></td>\
               <td><p>Chad Brown</p><p>Owner LLC</p><p>Flavien Prat</p></td>\
               <td>126</td>\
               <td><p>5/2</p></td>\
             </tr>"
        )
    }

    fn parse(rows: &[String]) -> Result<Vec<EntryRow>, ExtractError> {
        let doc = Html::parse_document(&format!(
            "<html><body><table class=\"table-entries\">\
             <thead><tr><th>#</th><th>PP</th><th></th><th>Horse</th><th>Trainer</th><th>Wt</th><th>ML</th></tr></thead>\
             <tbody>{}</tbody></table></body></html>",
            rows.concat()
        ));
        let table = doc
            .select(&Selector::parse("table.table-entries").unwrap())
            .next()
            .unwrap();
        EntriesParser::parse(&table)
    }

    #[test]
    fn test_running_rows_use_image_alt() {
        let entries = parse(&[
            row(None, "<td><img alt=\"1\"></td>", "Alpha"),
            row(Some(""), "<td><img alt=\"2\"></td>", "Bravo"),
        ])
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.running));
        assert_eq!(entries[0].program_number, 1);
        assert_eq!(entries[1].program_number, 2);

        let first = &entries[0];
        assert_eq!(first.horse_name, "Alpha");
        assert_eq!(first.sire, "Curlin");
        assert_eq!(first.trainer, "Chad Brown");
        assert_eq!(first.jockey, "Flavien Prat");
        assert_eq!(first.ml_odds, "5/2");
    }

    #[test]
    fn test_scratched_row_uses_data_label() {
        let entries = parse(&[
            row(None, "<td><img alt=\"1\"></td>", "Alpha"),
            row(
                Some("scratched"),
                "<td data-label=\"Program Number 7\"></td>",
                "Scratchy",
            ),
        ])
        .unwrap();

        assert!(!entries[1].running);
        assert_eq!(entries[1].program_number, 7);
        assert_eq!(entries[1].horse_name, "Scratchy");
    }

    #[test]
    fn test_unknown_class_fails() {
        let err = parse(&[row(Some("also-eligible"), "<td><img alt=\"1\"></td>", "Alpha")])
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnrecognizedRowClass(c) if c == "also-eligible"));
    }

    #[test]
    fn test_missing_image_fails() {
        let err = parse(&[row(None, "<td>1</td>", "Alpha")]).unwrap_err();
        assert!(matches!(err, ExtractError::MissingElement(_)));
    }

    #[test]
    fn test_bad_program_number() {
        let err = parse(&[row(None, "<td><img alt=\"1A\"></td>", "Alpha")]).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidNumber { .. }));
    }
}
