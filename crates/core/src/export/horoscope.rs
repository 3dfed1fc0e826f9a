//! Horoscope spread export.
//!
//! Only settled, successful entries are written; pending and failed signs are
//! left out, so a spread may hold fewer than twelve entries.

use chrono::SecondsFormat;

use crate::horoscope::HoroscopeRun;
use crate::types::Timestamp;
use crate::xml::{escape, XML_DECLARATION};

use super::filename::HOROSCOPE_FILENAME;
use super::ExportDocument;

/// Serialize a run's exportable entries, stamped with `exported_at`.
pub fn horoscope_xml(run: &HoroscopeRun, exported_at: Timestamp) -> String {
    let params = &run.params;
    let mut xml = String::with_capacity(1024);

    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str("<root>\n");
    xml.push_str("  <horoscopeSpread>\n");

    xml.push_str("    <metadata>\n");
    xml.push_str(&format!(
        "      <publication>{}</publication>\n",
        escape(&params.magazine)
    ));
    xml.push_str(&format!(
        "      <type>{}</type>\n",
        escape(params.horoscope_type.label())
    ));
    xml.push_str(&format!("      <tone>{}</tone>\n", escape(params.tone.label())));
    xml.push_str(&format!(
        "      <wordCount>{}</wordCount>\n",
        params.word_count
    ));
    xml.push_str(&format!(
        "      <exportDate>{}</exportDate>\n",
        exported_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    xml.push_str("    </metadata>\n");

    xml.push_str("    <zodiacEntries>\n");
    for (sign, forecast) in run.board.exportable() {
        xml.push_str("      <entry>\n");
        xml.push_str(&format!("        <sign>{}</sign>\n", sign.name()));
        xml.push_str(&format!("        <dates>{}</dates>\n", sign.date_range()));
        xml.push_str(&format!("        <forecast>{}</forecast>\n", escape(forecast)));
        xml.push_str("      </entry>\n");
    }
    xml.push_str("    </zodiacEntries>\n");

    xml.push_str("  </horoscopeSpread>\n");
    xml.push_str("</root>\n");
    xml
}

/// Serialize a run into the fixed-name horoscope document.
pub fn build_horoscope_export(run: &HoroscopeRun, exported_at: Timestamp) -> ExportDocument {
    ExportDocument::xml(HOROSCOPE_FILENAME, horoscope_xml(run, exported_at))
}
