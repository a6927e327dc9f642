//! Win/place/show payout table and also-rans parser.

use scraper::ElementRef;

use super::{cells, selector, text_of};
use crate::error::ExtractError;
use crate::scraper::parsers::OddsParser;
use crate::types::PayoutRow;

const ALSO_RANS_PREFIX: &str = "Also rans: ";

/// Parser for `table-payouts` plus the matching `race-also-rans` block.
pub struct PayoutTableParser;

impl PayoutTableParser {
    /// Build one row per finisher: paid positions first, then also-rans.
    pub fn build(table: &ElementRef, also_rans: &ElementRef) -> Result<Vec<PayoutRow>, ExtractError> {
        let tr = selector("tr")?;
        let rows: Vec<_> = table.select(&tr).collect();

        // header, win, place, show
        if rows.len() < 4 {
            return Err(ExtractError::MissingElement("payout table rows"));
        }

        let paid = if rows.len() >= 5 { 4 } else { 3 };
        let mut payouts = Vec::with_capacity(paid);
        for (finish, row) in rows.iter().enumerate().skip(1).take(paid) {
            payouts.push(Self::parse_row(row, finish as u32)?);
        }

        let start = rows.len() as u32;
        let text = also_rans.text().collect::<String>();
        let names = Self::also_ran_names(&text);
        payouts.extend(names.into_iter().enumerate().map(|(i, name)| PayoutRow {
            finish: start + i as u32,
            horse_name: name,
            win_paid: 0.0,
            place_paid: 0.0,
            show_paid: 0.0,
        }));

        Ok(payouts)
    }

    fn parse_row(row: &ElementRef, finish: u32) -> Result<PayoutRow, ExtractError> {
        let cols = cells(row)?;
        let cell = |i: usize| {
            cols.get(i)
                .map(text_of)
                .ok_or(ExtractError::MissingElement("payout cell"))
        };

        Ok(PayoutRow {
            finish,
            horse_name: cell(0)?,
            win_paid: OddsParser::parse_payout(&cell(2)?)?,
            place_paid: OddsParser::parse_payout(&cell(3)?)?,
            show_paid: OddsParser::parse_payout(&cell(4)?)?,
        })
    }

    /// "Also rans: A, B, C" -> ["A", "B", "C"]
    fn also_ran_names(text: &str) -> Vec<String> {
        text.trim()
            .replace(ALSO_RANS_PREFIX, "")
            .split(", ")
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn payout_row(name: &str, win: &str, place: &str, show: &str) -> String {
        format!(
            "<tr><td>{name}</td><td><img alt=\"1\"></td><td>{win}</td><td>{place}</td><td>{show}</td></tr>"
        )
    }

    fn page(rows: &[String], also_rans: &str) -> Html {
        Html::parse_document(&format!(
            "<html><body><table class=\"table-payouts\">\
             <tr><th>Runner</th><th>#</th><th>Win</th><th>Place</th><th>Show</th></tr>\
             {}</table><div class=\"race-also-rans\">{}</div></body></html>",
            rows.concat(),
            also_rans
        ))
    }

    fn build(doc: &Html) -> Result<Vec<PayoutRow>, ExtractError> {
        let table = doc
            .select(&Selector::parse("table.table-payouts").unwrap())
            .next()
            .unwrap();
        let ar = doc
            .select(&Selector::parse("div.race-also-rans").unwrap())
            .next()
            .unwrap();
        PayoutTableParser::build(&table, &ar)
    }

    #[test]
    fn test_four_paid_rows_no_also_rans() {
        let doc = page(
            &[
                payout_row("Alpha", "$8.20", "$4.40", "$3.00"),
                payout_row("Bravo", "-", "$5.60", "$3.80"),
                payout_row("Charlie", "-", "-", "$2.60"),
                payout_row("Delta", "-", "-", "-"),
            ],
            "",
        );

        let rows = build(&doc).unwrap();
        assert_eq!(rows.len(), 4);
        let finishes: Vec<_> = rows.iter().map(|r| r.finish).collect();
        assert_eq!(finishes, vec![1, 2, 3, 4]);
        assert_eq!(rows[0].win_paid, 8.2);
        assert_eq!(rows[1].win_paid, 0.0);
        assert_eq!(rows[1].place_paid, 5.6);
        assert_eq!(rows[3].horse_name, "Delta");
        assert_eq!(rows[3].show_paid, 0.0);
    }

    #[test]
    fn test_also_rans_continue_from_row_count() {
        let doc = page(
            &[
                payout_row("Alpha", "$8.20", "$4.40", "$3.00"),
                payout_row("Bravo", "-", "$5.60", "$3.80"),
                payout_row("Charlie", "-", "-", "$2.60"),
            ],
            "\n Also rans: Echo, Foxtrot, Golf \n",
        );

        let rows = build(&doc).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[3].horse_name, "Echo");
        assert_eq!(rows[3].finish, 4);
        assert_eq!(rows[5].horse_name, "Golf");
        assert_eq!(rows[5].finish, 6);
        assert!(rows[3..].iter().all(|r| r.win_paid == 0.0
            && r.place_paid == 0.0
            && r.show_paid == 0.0));
    }

    #[test]
    fn test_blank_fourth_place_cells() {
        let doc = page(
            &[
                payout_row("Alpha", "$8.20", "$4.40", "$3.00"),
                payout_row("Bravo", "-", "$5.60", "$3.80"),
                payout_row("Charlie", "-", "-", "$2.60"),
                "<tr><td>Delta</td><td></td><td></td><td></td><td></td></tr>".to_string(),
            ],
            "Also rans: Echo",
        );

        let rows = build(&doc).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[3].horse_name, "Delta");
        assert_eq!(rows[3].finish, 4);
        assert_eq!(
            (rows[3].win_paid, rows[3].place_paid, rows[3].show_paid),
            (0.0, 0.0, 0.0)
        );
        assert_eq!(rows[4].finish, 5);
    }

    #[test]
    fn test_too_few_rows() {
        let doc = page(&[payout_row("Alpha", "$8.20", "$4.40", "$3.00")], "");
        assert!(matches!(
            build(&doc),
            Err(ExtractError::MissingElement(_))
        ));
    }

    #[test]
    fn test_also_ran_names() {
        assert_eq!(
            PayoutTableParser::also_ran_names("Also rans: A, B"),
            vec!["A".to_string(), "B".to_string()]
        );
        assert!(PayoutTableParser::also_ran_names("  ").is_empty());
    }
}
