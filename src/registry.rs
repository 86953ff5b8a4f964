//! Source registry.
//!
//! The built-in roster of fetchable camera feeds and the catalogue of feeds
//! that need credentials. Adding a source is a data change here (or an
//! `extra_sources` entry in the settings file); nothing downstream changes.

use crate::error::AppError;
use crate::models::{AdapterKind, AuthRequiredSource, SourceDescriptor};
use itertools::Itertools;
use once_cell::sync::Lazy;
use std::fmt::Write;
use tracing::{debug, instrument};
use url::Url;

use crate::models::AdapterKind::{ArcGis, Caltrans, DirectArray, System511};

/// `(id, name, state, jurisdiction, url, adapter)`
type SourceRow = (&'static str, &'static str, &'static str, &'static str, &'static str, AdapterKind);

const BUILTIN_SOURCES: &[SourceRow] = &[
    // ── NYC ──────────────────────────────────────────────────────────
    ("ny_nycdot", "NYC DOT", "NY", "City", "https://webcams.nyctmc.org/api/cameras", DirectArray),
    // ── 511 systems ─────────────────────────────────────────────────
    ("ny_511ny", "511NY - New York State", "NY", "State", "https://511ny.org/map/mapIcons/Cameras", System511),
    ("fl_fl511", "FL511", "FL", "State", "https://fl511.com/map/mapIcons/Cameras", System511),
    ("ga_511ga", "Georgia 511", "GA", "State", "https://511ga.org/map/mapIcons/Cameras", System511),
    ("az_az511", "Arizona 511", "AZ", "State", "https://az511.gov/map/mapIcons/Cameras", System511),
    ("la_511la", "Louisiana 511", "LA", "State", "https://511la.org/map/mapIcons/Cameras", System511),
    ("nv_nvroads", "Nevada Roads", "NV", "State", "https://nvroads.com/map/mapIcons/Cameras", System511),
    ("ut_udot", "Utah DOT", "UT", "State", "https://udottraffic.utah.gov/map/mapIcons/Cameras", System511),
    ("wi_511wi", "Wisconsin 511", "WI", "State", "https://511wi.gov/map/mapIcons/Cameras", System511),
    ("pa_511pa", "Pennsylvania 511", "PA", "State", "https://511pa.com/map/mapIcons/Cameras", System511),
    ("ct_cttravel", "Connecticut Travel", "CT", "State", "https://ctroads.org/map/mapIcons/Cameras", System511),
    (
        "ne_newengland511",
        "New England 511 (ME/VT/NH)",
        "ME/VT/NH",
        "Regional",
        "https://newengland511.org/map/mapIcons/Cameras",
        System511,
    ),
    ("id_511id", "Idaho 511", "ID", "State", "https://511.idaho.gov/map/mapIcons/Cameras", System511),
    ("ak_511ak", "Alaska 511", "AK", "State", "http://511.alaska.gov/map/mapIcons/Cameras", System511),
    // ── Caltrans districts ──────────────────────────────────────────
    ("ca_caltrans_d1", "Caltrans District 1", "CA", "State District", "https://cwwp2.dot.ca.gov/data/d1/cctv/cctvStatusD01.json", Caltrans),
    ("ca_caltrans_d2", "Caltrans District 2", "CA", "State District", "https://cwwp2.dot.ca.gov/data/d2/cctv/cctvStatusD02.json", Caltrans),
    ("ca_caltrans_d3", "Caltrans District 3", "CA", "State District", "https://cwwp2.dot.ca.gov/data/d3/cctv/cctvStatusD03.json", Caltrans),
    (
        "ca_caltrans_d4",
        "Caltrans District 4 - Bay Area",
        "CA",
        "State District",
        "https://cwwp2.dot.ca.gov/data/d4/cctv/cctvStatusD04.json",
        Caltrans,
    ),
    ("ca_caltrans_d5", "Caltrans District 5", "CA", "State District", "https://cwwp2.dot.ca.gov/data/d5/cctv/cctvStatusD05.json", Caltrans),
    ("ca_caltrans_d6", "Caltrans District 6", "CA", "State District", "https://cwwp2.dot.ca.gov/data/d6/cctv/cctvStatusD06.json", Caltrans),
    (
        "ca_caltrans_d7",
        "Caltrans District 7 - LA Metro",
        "CA",
        "State District",
        "https://cwwp2.dot.ca.gov/data/d7/cctv/cctvStatusD07.json",
        Caltrans,
    ),
    ("ca_caltrans_d8", "Caltrans District 8", "CA", "State District", "https://cwwp2.dot.ca.gov/data/d8/cctv/cctvStatusD08.json", Caltrans),
    ("ca_caltrans_d9", "Caltrans District 9", "CA", "State District", "https://cwwp2.dot.ca.gov/data/d9/cctv/cctvStatusD09.json", Caltrans),
    ("ca_caltrans_d10", "Caltrans District 10", "CA", "State District", "https://cwwp2.dot.ca.gov/data/d10/cctv/cctvStatusD10.json", Caltrans),
    (
        "ca_caltrans_d11",
        "Caltrans District 11 - San Diego",
        "CA",
        "State District",
        "https://cwwp2.dot.ca.gov/data/d11/cctv/cctvStatusD11.json",
        Caltrans,
    ),
    ("ca_caltrans_d12", "Caltrans District 12", "CA", "State District", "https://cwwp2.dot.ca.gov/data/d12/cctv/cctvStatusD12.json", Caltrans),
    // ── ArcGIS ──────────────────────────────────────────────────────
    (
        "md_chart",
        "Maryland CHART",
        "MD",
        "State",
        "https://mdgeodata.md.gov/imap/rest/services/Transportation/MD_TrafficCameras/MapServer/0/query?where=1%3D1&outFields=*&f=json",
        ArcGis,
    ),
];

/// `(state, name, url, notes)`
const AUTH_REQUIRED: &[(&str, &str, &str, &str)] = &[
    ("CO", "Colorado COTRIP", "https://www.cotrip.org/api/graphql", "Uses GraphQL with specific queries, may require session"),
    ("OH", "Ohio OHGO", "https://publicapi.ohgo.com/api/v1/Cameras", "Requires API key - register at https://publicapi.ohgo.com"),
    (
        "IL",
        "Travel Midwest / Illinois Gateway",
        "https://travelmidwest.com/lmiga/",
        "Requires registration at https://travelmidwest.com/lmiga/registration.jsp",
    ),
    ("VA", "Virginia 511", "https://www.511virginia.org/", "May require session/cookies from browser"),
    ("TN", "Tennessee SmartWay", "https://smartway.tn.gov/", "Angular app with protected API"),
    ("TX", "Texas DriveTexas", "https://drivetexas.org/", "API requires authentication"),
    ("MA", "Massachusetts 511", "https://mass511.com/", "Protected API, may need session"),
    ("MN", "Minnesota 511", "https://511mn.org/", "Protected API"),
    ("MI", "Michigan DOT", "https://mdotjboss.state.mi.us/", "Protected API"),
    ("NJ", "New Jersey 511", "https://www.511nj.org/", "Returns 403 - requires authentication"),
];

static BUILTIN: Lazy<Vec<SourceDescriptor>> = Lazy::new(|| {
    BUILTIN_SOURCES
        .iter()
        .map(|&(id, name, state, kind, url, adapter)| SourceDescriptor::new(id, name, state, kind, url, adapter))
        .collect()
});

static BUILTIN_AUTH: Lazy<Vec<AuthRequiredSource>> = Lazy::new(|| {
    AUTH_REQUIRED
        .iter()
        .map(|&(state, name, url, notes)| AuthRequiredSource {
            state: state.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            notes: notes.to_string(),
        })
        .collect()
});

/// Built-in fetchable sources, in fetch order.
pub fn builtin_sources() -> &'static [SourceDescriptor] {
    &BUILTIN
}

/// Built-in catalogue of sources that need credentials.
pub fn builtin_auth_required() -> &'static [AuthRequiredSource] {
    &BUILTIN_AUTH
}

/// The roster for one run. Read-only once built.
#[derive(Debug, Clone)]
pub struct Registry {
    sources: Vec<SourceDescriptor>,
    auth_required: Vec<AuthRequiredSource>,
}

impl Registry {
    /// Build and validate a registry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when an id is duplicated or empty, a name
    /// is empty, or a URL does not parse. Unknown adapter kinds are rejected
    /// earlier, when the settings file is deserialized.
    pub fn new(
        sources: Vec<SourceDescriptor>,
        auth_required: Vec<AuthRequiredSource>,
    ) -> Result<Self, AppError> {
        for source in &sources {
            if source.id.trim().is_empty() {
                return Err(AppError::config(format!(
                    "source `{}` has an empty id",
                    source.name
                )));
            }
            if source.name.trim().is_empty() {
                return Err(AppError::config(format!("source `{}` has an empty name", source.id)));
            }
            Url::parse(&source.url).map_err(|e| {
                AppError::config(format!("source `{}` has an invalid url `{}`: {e}", source.id, source.url))
            })?;
        }

        let duplicates: Vec<&str> = sources.iter().map(|s| s.id.as_str()).duplicates().collect();
        if !duplicates.is_empty() {
            return Err(AppError::config(format!(
                "duplicate source ids: {}",
                duplicates.join(", ")
            )));
        }

        debug!(
            sources = sources.len(),
            auth_required = auth_required.len(),
            "Registry validated"
        );
        Ok(Self {
            sources,
            auth_required,
        })
    }

    /// The built-in roster plus `extra`, minus any id in `disabled`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if a disabled id names no source, or if the
    /// combined roster fails [`Registry::new`] validation.
    #[instrument(level = "debug", skip_all, fields(extra = extra.len(), disabled = disabled.len()))]
    pub fn builtin_with(extra: Vec<SourceDescriptor>, disabled: &[String]) -> Result<Self, AppError> {
        let all: Vec<SourceDescriptor> = builtin_sources().iter().cloned().chain(extra).collect();
        if let Some(unknown) = disabled.iter().find(|id| !all.iter().any(|s| &s.id == *id)) {
            return Err(AppError::config(format!("cannot disable unknown source id `{unknown}`")));
        }
        let sources = all.into_iter().filter(|s| !disabled.contains(&s.id)).collect();
        Self::new(sources, builtin_auth_required().to_vec())
    }

    /// Keep only the sources whose ids are listed, preserving roster order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if any requested id is not in the roster.
    pub fn retain_ids(self, ids: &[String]) -> Result<Self, AppError> {
        if ids.is_empty() {
            return Ok(self);
        }
        if let Some(missing) = ids.iter().find(|id| !self.sources.iter().any(|s| &s.id == *id)) {
            return Err(AppError::config(format!("unknown source id `{missing}`")));
        }
        let sources = self
            .sources
            .into_iter()
            .filter(|s| ids.contains(&s.id))
            .collect();
        Ok(Self {
            sources,
            auth_required: self.auth_required,
        })
    }

    pub fn sources(&self) -> &[SourceDescriptor] {
        &self.sources
    }

    pub fn auth_required(&self) -> &[AuthRequiredSource] {
        &self.auth_required
    }

    /// Render the roster and the credential-gated catalogue for `--list-sources`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        writeln!(out, "Fetchable sources ({}):", self.sources.len()).unwrap();
        for s in &self.sources {
            writeln!(out, "  {:<18} {:<8} {:<12} {}", s.id, s.state, s.adapter, s.name).unwrap();
        }
        writeln!(
            out,
            "\nRequires authentication ({}, not fetched):",
            self.auth_required.len()
        )
        .unwrap();
        for a in &self.auth_required {
            writeln!(out, "  {:<4} {} - {}", a.state, a.name, a.notes).unwrap();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED_SOURCE_COUNT: usize = 27;

    fn extra(id: &str) -> SourceDescriptor {
        SourceDescriptor::new(id, "Extra", "OR", "State", "https://tripcheck.example/cams", Caltrans)
    }

    #[test]
    fn test_builtin_roster_loads() {
        let registry = Registry::builtin_with(Vec::new(), &[]).unwrap();
        assert_eq!(registry.sources().len(), EXPECTED_SOURCE_COUNT);
        assert_eq!(registry.auth_required().len(), 10);
        assert_eq!(registry.sources()[0].id, "ny_nycdot");
    }

    #[test]
    fn test_builtin_adapter_mix() {
        let count = |kind: AdapterKind| builtin_sources().iter().filter(|s| s.adapter == kind).count();
        assert_eq!(count(DirectArray), 1);
        assert_eq!(count(System511), 13);
        assert_eq!(count(Caltrans), 12);
        assert_eq!(count(ArcGis), 1);
    }

    #[test]
    fn test_duplicate_ids_are_config_errors() {
        let err = Registry::builtin_with(vec![extra("fl_fl511")], &[]).unwrap_err();
        assert!(matches!(err, AppError::Config(ref m) if m.contains("fl_fl511")));
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let mut bad = extra("or_tripcheck");
        bad.url = "not a url".to_string();
        assert!(matches!(Registry::new(vec![bad], Vec::new()), Err(AppError::Config(_))));
    }

    #[test]
    fn test_extra_and_disabled_sources() {
        let disabled = vec!["md_chart".to_string()];
        let registry = Registry::builtin_with(vec![extra("or_tripcheck")], &disabled).unwrap();
        assert_eq!(registry.sources().len(), EXPECTED_SOURCE_COUNT);
        assert_eq!(registry.sources().last().unwrap().id, "or_tripcheck");
        assert!(!registry.sources().iter().any(|s| s.id == "md_chart"));
    }

    #[test]
    fn test_disable_unknown_id_fails() {
        let result = Registry::builtin_with(Vec::new(), &["zz_nowhere".to_string()]);
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("zz_nowhere")));
    }

    #[test]
    fn test_disable_extra_source() {
        let disabled = vec!["or_tripcheck".to_string()];
        let registry = Registry::builtin_with(vec![extra("or_tripcheck")], &disabled).unwrap();
        assert_eq!(registry.sources().len(), EXPECTED_SOURCE_COUNT);
    }

    #[test]
    fn test_retain_ids_preserves_roster_order() {
        let registry = Registry::builtin_with(Vec::new(), &[])
            .unwrap()
            .retain_ids(&["md_chart".to_string(), "ny_nycdot".to_string()])
            .unwrap();
        let ids: Vec<&str> = registry.sources().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ny_nycdot", "md_chart"]);
        assert_eq!(registry.auth_required().len(), 10);
    }

    #[test]
    fn test_retain_unknown_id_fails() {
        let result = Registry::builtin_with(Vec::new(), &[])
            .unwrap()
            .retain_ids(&["zz_nowhere".to_string()]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_describe_lists_both_catalogues() {
        let registry = Registry::builtin_with(Vec::new(), &[]).unwrap();
        let text = registry.describe();
        assert!(text.contains("Fetchable sources (27)"));
        assert!(text.contains("Ohio OHGO"));
        assert!(text.contains("511_system"));
    }
}
