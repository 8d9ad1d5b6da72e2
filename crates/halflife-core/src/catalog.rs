//! Isotope reference table.
//!
//! The table is semicolon-delimited text with a header line naming an
//! `Isotope` column and a half-life column (`Demi-vie (années)` or
//! `Half-life (years)`). Column order is free and extra columns are ignored.
//! Half-lives may use either `.` or `,` as decimal separator.
//!
//! The catalog keeps file order: selections and listings come back in the
//! order isotopes appear in the table, not in the order they were requested.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::constants::{CATALOG_DELIMITER, HALF_LIFE_COLUMN, HALF_LIFE_COLUMN_ALIAS, NAME_COLUMN};
use crate::error::CatalogError;
use crate::types::Isotope;

const BUILTIN_TABLE: &str = include_str!("../data/isotopes_list.csv");

/// In-memory isotope table with name lookup.
#[derive(Debug, Clone)]
pub struct IsotopeCatalog {
    isotopes: Vec<Isotope>,
    index: HashMap<String, usize>,
}

/// Result of filtering the catalog by a set of requested names.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    /// Matching isotopes, in catalog order, each at most once.
    pub isotopes: Vec<&'a Isotope>,
    /// Requested names with no catalog entry, in request order, deduplicated.
    pub unmatched: Vec<String>,
}

impl IsotopeCatalog {
    /// The reference table shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        BUILTIN_TABLE.parse()
    }

    /// Read and parse a table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let catalog: Self = text.parse()?;
        debug!(path = %path.display(), isotopes = catalog.len(), "isotope table loaded");
        Ok(catalog)
    }

    /// Load `path` when given, otherwise the built-in table.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Build a catalog from already-parsed records.
    ///
    /// Applies the same checks as the text parser; `line` in errors is the
    /// 1-based record position.
    pub fn from_isotopes(isotopes: Vec<Isotope>) -> Result<Self, CatalogError> {
        let mut catalog = Self { isotopes: Vec::with_capacity(isotopes.len()), index: HashMap::new() };
        for (i, isotope) in isotopes.into_iter().enumerate() {
            catalog.push(i + 1, isotope)?;
        }
        if catalog.isotopes.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    fn push(&mut self, line: usize, isotope: Isotope) -> Result<(), CatalogError> {
        if isotope.name.is_empty() {
            return Err(CatalogError::InvalidRecord { line, reason: "empty isotope name".into() });
        }
        if !(isotope.half_life.is_finite() && isotope.half_life > 0.0) {
            return Err(CatalogError::InvalidRecord {
                line,
                reason: format!("half-life must be a positive number, got {}", isotope.half_life),
            });
        }
        if self.index.contains_key(&isotope.name) {
            return Err(CatalogError::DuplicateIsotope { line, name: isotope.name });
        }
        self.index.insert(isotope.name.clone(), self.isotopes.len());
        self.isotopes.push(isotope);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Isotope> {
        self.index.get(name).map(|&i| &self.isotopes[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.isotopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.isotopes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Isotope> {
        self.isotopes.iter()
    }

    pub fn isotopes(&self) -> &[Isotope] {
        &self.isotopes
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.isotopes.iter().map(|i| i.name.as_str())
    }

    /// Keep the catalogued isotopes whose name is in `names`.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Selection<'_> {
        let requested: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();

        let isotopes = self
            .isotopes
            .iter()
            .filter(|i| requested.contains(i.name.as_str()))
            .collect();

        let mut seen = HashSet::new();
        let unmatched = names
            .iter()
            .map(|n| n.as_ref())
            .filter(|n| !self.contains(n) && seen.insert(*n))
            .map(str::to_owned)
            .collect();

        Selection { isotopes, unmatched }
    }
}

impl<'a> IntoIterator for &'a IsotopeCatalog {
    type Item = &'a Isotope;
    type IntoIter = std::slice::Iter<'a, Isotope>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for IsotopeCatalog {
    type Err = CatalogError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

        let Some((_, header)) = lines.next() else {
            return Err(CatalogError::Empty);
        };
        let columns: Vec<String> = header
            .split(CATALOG_DELIMITER)
            .map(|c| c.trim().to_lowercase())
            .collect();
        let find = |wanted: &[&str]| {
            columns
                .iter()
                .position(|c| wanted.iter().any(|w| *c == w.to_lowercase()))
        };
        let name_col = find(&[NAME_COLUMN]).ok_or(CatalogError::MissingColumn(NAME_COLUMN))?;
        let half_life_col = find(&[HALF_LIFE_COLUMN, HALF_LIFE_COLUMN_ALIAS])
            .ok_or(CatalogError::MissingColumn(HALF_LIFE_COLUMN))?;
        let width = name_col.max(half_life_col) + 1;

        let mut catalog = Self { isotopes: Vec::new(), index: HashMap::new() };
        for (i, raw) in lines {
            let line = i + 1;
            let fields: Vec<&str> = raw.split(CATALOG_DELIMITER).map(str::trim).collect();
            if fields.len() < width {
                return Err(CatalogError::InvalidRecord {
                    line,
                    reason: format!("expected at least {width} fields, found {}", fields.len()),
                });
            }
            let half_life = parse_half_life(fields[half_life_col]).ok_or_else(|| {
                CatalogError::InvalidRecord {
                    line,
                    reason: format!("unparsable half-life `{}`", fields[half_life_col]),
                }
            })?;
            catalog.push(line, Isotope::new(fields[name_col], half_life))?;
        }

        if catalog.isotopes.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }
}

fn parse_half_life(field: &str) -> Option<f64> {
    if let Ok(v) = field.parse::<f64>() {
        return Some(v);
    }
    // Decimal comma, as written by French-locale spreadsheets.
    if field.contains(',') && !field.contains('.') {
        return field.replacen(',', ".", 1).parse().ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    const SMALL: &str = "Isotope;Demi-vie (années)\nCarbon-14;5730\nCobalt-60;5.2714\nLead-202;52500\n";

    fn small() -> IsotopeCatalog {
        SMALL.parse().unwrap()
    }

    #[test]
    fn parses_reference_format() {
        let c = small();
        assert_eq!(c.len(), 3);
        assert_eq!(c.names().collect::<Vec<_>>(), ["Carbon-14", "Cobalt-60", "Lead-202"]);
        assert_relative_eq!(c.get("Cobalt-60").unwrap().half_life, 5.2714);
    }

    #[test]
    fn builtin_table_is_valid() {
        let c = IsotopeCatalog::builtin().unwrap();
        assert!(c.len() >= 20);
        for name in crate::constants::DEFAULT_SELECTION {
            assert!(c.contains(name), "builtin table lacks {name}");
        }
        assert!(c.iter().all(|i| i.half_life > 0.0));
    }

    #[test]
    fn accepts_english_header_and_reordered_columns() {
        let c: IsotopeCatalog = "Half-life (years);Symbol;Isotope\n12.32;H;Hydrogen-3\n".parse().unwrap();
        assert_eq!(c.get("Hydrogen-3").unwrap().half_life, 12.32);
    }

    #[test]
    fn header_matching_ignores_case_and_padding() {
        let c: IsotopeCatalog = " isotope ; DEMI-VIE (ANNÉES) \nCesium-137;30.17\n".parse().unwrap();
        assert!(c.contains("Cesium-137"));
    }

    #[test]
    fn accepts_decimal_comma_and_exponent() {
        let c: IsotopeCatalog = "Isotope;Demi-vie (années)\nCobalt-60;5,2714\nUranium-238;4.468e9\n"
            .parse()
            .unwrap();
        assert_relative_eq!(c.get("Cobalt-60").unwrap().half_life, 5.2714);
        assert_relative_eq!(c.get("Uranium-238").unwrap().half_life, 4.468e9);
    }

    #[test]
    fn skips_blank_lines_and_bom() {
        let c: IsotopeCatalog = "\u{feff}Isotope;Demi-vie (années)\n\nCarbon-14;5730\n   \n".parse().unwrap();
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn rejects_missing_columns() {
        let e = "Name;Demi-vie (années)\nX;1\n".parse::<IsotopeCatalog>().unwrap_err();
        assert!(matches!(e, CatalogError::MissingColumn(NAME_COLUMN)));
        let e = "Isotope;Years\nX;1\n".parse::<IsotopeCatalog>().unwrap_err();
        assert!(matches!(e, CatalogError::MissingColumn(HALF_LIFE_COLUMN)));
    }

    #[test]
    fn rejects_non_positive_half_life() {
        let e = "Isotope;Demi-vie (années)\nA;1\nB;0\n".parse::<IsotopeCatalog>().unwrap_err();
        assert!(matches!(e, CatalogError::InvalidRecord { line: 3, .. }));
        let e = "Isotope;Demi-vie (années)\nA;-4\n".parse::<IsotopeCatalog>().unwrap_err();
        assert!(matches!(e, CatalogError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn rejects_garbage_half_life() {
        let e = "Isotope;Demi-vie (années)\nA;soon\n".parse::<IsotopeCatalog>().unwrap_err();
        assert!(matches!(e, CatalogError::InvalidRecord { line: 2, .. }));
        let e = "Isotope;Demi-vie (années)\nA;inf\n".parse::<IsotopeCatalog>().unwrap_err();
        assert!(matches!(e, CatalogError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn rejects_short_lines() {
        let e = "Isotope;Demi-vie (années)\nLonely\n".parse::<IsotopeCatalog>().unwrap_err();
        assert!(matches!(e, CatalogError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn rejects_empty_name() {
        let e = "Isotope;Demi-vie (années)\n;3\n".parse::<IsotopeCatalog>().unwrap_err();
        assert!(matches!(e, CatalogError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn rejects_duplicates() {
        let e = "Isotope;Demi-vie (années)\nA;1\nA;2\n".parse::<IsotopeCatalog>().unwrap_err();
        match e {
            CatalogError::DuplicateIsotope { line, name } => {
                assert_eq!(line, 3);
                assert_eq!(name, "A");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_empty_tables() {
        assert!(matches!("".parse::<IsotopeCatalog>(), Err(CatalogError::Empty)));
        assert!(matches!(
            "Isotope;Demi-vie (années)\n".parse::<IsotopeCatalog>(),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(IsotopeCatalog::from_isotopes(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn from_isotopes_validates() {
        let ok = IsotopeCatalog::from_isotopes(vec![Isotope::new("A", 1.0)]).unwrap();
        assert!(ok.contains("A"));
        let e = IsotopeCatalog::from_isotopes(vec![Isotope::new("A", f64::NAN)]).unwrap_err();
        assert!(matches!(e, CatalogError::InvalidRecord { line: 1, .. }));
    }

    #[test]
    fn select_keeps_catalog_order() {
        let c = small();
        let s = c.select(&["Lead-202", "Carbon-14"]);
        let names: Vec<_> = s.isotopes.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Carbon-14", "Lead-202"]);
        assert!(s.unmatched.is_empty());
    }

    #[test]
    fn select_collapses_duplicates_and_reports_unknown() {
        let c = small();
        let s = c.select(&["Cobalt-60", "Unobtainium", "Cobalt-60", "Unobtainium", "Xenon-1"]);
        assert_eq!(s.isotopes.len(), 1);
        assert_eq!(s.unmatched, ["Unobtainium", "Xenon-1"]);
    }

    #[test]
    fn select_nothing() {
        let c = small();
        let s = c.select::<&str>(&[]);
        assert!(s.isotopes.is_empty());
        assert!(s.unmatched.is_empty());
    }

    #[test]
    fn load_from_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(SMALL.as_bytes()).unwrap();
        let c = IsotopeCatalog::load(f.path()).unwrap();
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn load_or_builtin_picks_source() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(SMALL.as_bytes()).unwrap();
        assert_eq!(IsotopeCatalog::load_or_builtin(Some(f.path())).unwrap().len(), 3);
        assert_eq!(
            IsotopeCatalog::load_or_builtin(None).unwrap().len(),
            IsotopeCatalog::builtin().unwrap().len()
        );
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let e = IsotopeCatalog::load(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(e, CatalogError::Io(_)));
    }
}
