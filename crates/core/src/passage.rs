//! Expansion of abbreviated passage references into display text and links.
//!
//! Plan entries are semicolon-delimited lists of passage mentions using the
//! Indonesian (Terjemahan Baru) book abbreviations, e.g. `"Kej. 1-3; Mzm. 1"`.
//! Each mention is expanded to the full book name and turned into a deep link
//! to alkitab.sabda.org.

use serde::Serialize;

/// Base URL for passage deep links.
const ALKITAB_PASSAGE_URL: &str = "https://alkitab.sabda.org/passage.php?passage=";

/// Abbreviation-to-full-name table for the 66 books.
///
/// Matching walks the table in order and takes the first prefix hit, so
/// order is significant: `Ams.` must come before `Am.`.
const BOOK_ABBREVIATIONS: &[(&str, &str)] = &[
    // Old Testament
    ("Kej.", "Kejadian"),
    ("Kel.", "Keluaran"),
    ("Im.", "Imamat"),
    ("Bil.", "Bilangan"),
    ("Ul.", "Ulangan"),
    ("Yos.", "Yosua"),
    ("Hak.", "Hakim-hakim"),
    ("Rut", "Rut"),
    ("1Sam.", "1 Samuel"),
    ("2Sam.", "2 Samuel"),
    ("1Raj.", "1 Raja-raja"),
    ("2Raj.", "2 Raja-raja"),
    ("1Taw.", "1 Tawarikh"),
    ("2Taw.", "2 Tawarikh"),
    ("Ezr.", "Ezra"),
    ("Neh.", "Nehemia"),
    ("Est.", "Ester"),
    ("Ayb.", "Ayub"),
    ("Mzm.", "Mazmur"),
    ("Ams.", "Amsal"),
    ("Pkh.", "Pengkhotbah"),
    ("Kid.", "Kidung Agung"),
    ("Yes.", "Yesaya"),
    ("Yer.", "Yeremia"),
    ("Rat.", "Ratapan"),
    ("Yeh.", "Yehezkiel"),
    ("Dan.", "Daniel"),
    ("Hos.", "Hosea"),
    ("Yl.", "Yoel"),
    ("Am.", "Amos"),
    ("Ob.", "Obaja"),
    ("Yun.", "Yunus"),
    ("Mi.", "Mikha"),
    ("Nah.", "Nahum"),
    ("Hab.", "Habakuk"),
    ("Zef.", "Zefanya"),
    ("Hag.", "Hagai"),
    ("Za.", "Zakharia"),
    ("Mal.", "Maleakhi"),
    // New Testament
    ("Mat.", "Matius"),
    ("Mrk.", "Markus"),
    ("Luk.", "Lukas"),
    ("Yoh.", "Yohanes"),
    ("Kis.", "Kisah Para Rasul"),
    ("Rm.", "Roma"),
    ("1Kor.", "1 Korintus"),
    ("2Kor.", "2 Korintus"),
    ("Gal.", "Galatia"),
    ("Ef.", "Efesus"),
    ("Flp.", "Filipi"),
    ("Kol.", "Kolose"),
    ("1Tes.", "1 Tesalonika"),
    ("2Tes.", "2 Tesalonika"),
    ("1Tim.", "1 Timotius"),
    ("2Tim.", "2 Timotius"),
    ("Tit.", "Titus"),
    ("Flm.", "Filemon"),
    ("Ibr.", "Ibrani"),
    ("Yak.", "Yakobus"),
    ("1Ptr.", "1 Petrus"),
    ("2Ptr.", "2 Petrus"),
    ("1Yoh.", "1 Yohanes"),
    ("2Yoh.", "2 Yohanes"),
    ("3Yoh.", "3 Yohanes"),
    ("Yud.", "Yudas"),
    ("Why.", "Wahyu"),
];

/// A single passage mention with display text and deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassageLink {
    /// Expanded display text, e.g. "Kejadian 1-3".
    pub text: String,
    /// Deep link to the passage on alkitab.sabda.org.
    pub url: String,
}

/// Split a plan entry into individual passage links.
///
/// Mentions are separated by `;`. Whitespace around a mention is trimmed and
/// empty segments are skipped, so an empty input yields an empty vec rather
/// than an error. Output order follows input order.
#[must_use]
pub fn links_for(passage_text: &str) -> Vec<PassageLink> {
    passage_text
        .split(';')
        .map(str::trim)
        .filter(|mention| !mention.is_empty())
        .map(|mention| {
            let expanded = expand_abbreviation(mention);
            let url = passage_url(&expanded);
            PassageLink {
                text: expanded,
                url,
            }
        })
        .collect()
}

/// Expand a leading book abbreviation to the full book name.
///
/// Unknown prefixes pass through unchanged.
fn expand_abbreviation(mention: &str) -> String {
    for (abbreviation, full_name) in BOOK_ABBREVIATIONS {
        if let Some(rest) = mention.strip_prefix(abbreviation) {
            return format!("{full_name}{rest}");
        }
    }
    mention.to_string()
}

/// Build the alkitab.sabda.org deep link for an expanded passage.
///
/// The site expects `+` for spaces instead of `%20`; everything else is
/// standard percent-encoding.
fn passage_url(expanded: &str) -> String {
    let encoded = urlencoding::encode(expanded).replace("%20", "+");
    format!("{ALKITAB_PASSAGE_URL}{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_and_links_multiple_mentions() {
        let links = links_for("Kej. 1-3; Mzm. 1");
        assert_eq!(
            links,
            vec![
                PassageLink {
                    text: "Kejadian 1-3".to_string(),
                    url: "https://alkitab.sabda.org/passage.php?passage=Kejadian+1-3".to_string(),
                },
                PassageLink {
                    text: "Mazmur 1".to_string(),
                    url: "https://alkitab.sabda.org/passage.php?passage=Mazmur+1".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_input_yields_no_links() {
        assert!(links_for("").is_empty());
        assert!(links_for("  ;  ; ").is_empty());
    }

    #[test]
    fn unknown_abbreviation_passes_through() {
        let links = links_for("Unknown 5");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "Unknown 5");
        assert_eq!(
            links[0].url,
            "https://alkitab.sabda.org/passage.php?passage=Unknown+5"
        );
    }

    #[test]
    fn amsal_is_not_shadowed_by_amos() {
        assert_eq!(expand_abbreviation("Ams. 1-3"), "Amsal 1-3");
        assert_eq!(expand_abbreviation("Am. 1-3"), "Amos 1-3");
    }

    #[test]
    fn numbered_books_expand() {
        assert_eq!(expand_abbreviation("1Yoh. 1-5"), "1 Yohanes 1-5");
        assert_eq!(expand_abbreviation("2Raj. 4"), "2 Raja-raja 4");
    }

    #[test]
    fn trims_whitespace_and_preserves_order() {
        let links = links_for("  Mat. 1 ;Mrk. 2  ");
        let texts: Vec<_> = links.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Matius 1", "Markus 2"]);
    }
}
