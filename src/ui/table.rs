use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::outcome_label;
use crate::data::model::LaunchRecord;

const HEADERS: [&str; 7] = [
    "Flight",
    "Date",
    "Booster",
    "Launch site",
    "Payload (kg)",
    "Orbit",
    "Outcome",
];

/// Collapsible table of the launches currently plotted in the scatter chart.
pub fn records_table(ui: &mut Ui, rows: &[LaunchRecord]) {
    egui::CollapsingHeader::new(RichText::new(format!("Launches in view ({})", rows.len())).strong())
        .id_salt("records_table")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(240.0)
                .column(Column::auto())
                .columns(Column::auto().at_least(80.0), HEADERS.len() - 2)
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    for title in HEADERS {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, rows.len(), |mut row| {
                        let rec = &rows[row.index()];
                        for cell in cells(rec) {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                });
        });
}

fn cells(rec: &LaunchRecord) -> [String; 7] {
    [
        rec.flight_number.to_string(),
        format!("{} {}", rec.date, rec.time_utc),
        rec.booster_version.clone(),
        rec.launch_site.clone(),
        format!("{:.0}", rec.payload_mass_kg),
        rec.orbit.clone(),
        outcome_label(rec.class).to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn cells_line_up_with_headers() {
        let rec = record("KSC LC-39A", 0, 3136.0, "F9 FT B1029.2");
        let row = cells(&rec);

        assert_eq!(row.len(), HEADERS.len());
        assert_eq!(row[1], "2010-06-04 18:45:00");
        assert_eq!(row[2], "F9 FT B1029.2");
        assert_eq!(row[4], "3136");
        assert_eq!(row[6], "Failure");
    }
}
