//! Marker label to icon/color lookup.
//!
//! # Invariants
//! - Lookup is by exact label string; no normalization.
//! - Unmapped and missing markers resolve to [`DEFAULT_MARKER_STYLE`].

use serde::Serialize;

/// Icon and color pair used to decorate a record card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerStyle {
    pub icon: &'static str,
    /// CSS hex color.
    pub color: &'static str,
}

/// Fallback style for unknown markers (folder icon, neutral gray).
pub const DEFAULT_MARKER_STYLE: MarkerStyle = MarkerStyle {
    icon: "📁",
    color: "#9E9E9E",
};

/// Marker label used by the "Administrativo - Gestão" summary metric.
pub const MARKER_ADMIN_MANAGEMENT: &str = "Administrativo - Gestão";
/// Marker label used by the "Aguardando Resposta" summary metric.
pub const MARKER_AWAITING_RESPONSE: &str = "Aguardando Resposta da Área Responsável";

const MARKER_STYLES: &[(&str, MarkerStyle)] = &[
    (
        MARKER_ADMIN_MANAGEMENT,
        MarkerStyle {
            icon: "🗂️",
            color: "#1E88E5",
        },
    ),
    (
        MARKER_AWAITING_RESPONSE,
        MarkerStyle {
            icon: "⏳",
            color: "#FB8C00",
        },
    ),
    (
        "Urgente",
        MarkerStyle {
            icon: "🚨",
            color: "#E53935",
        },
    ),
    (
        "Financeiro",
        MarkerStyle {
            icon: "💰",
            color: "#43A047",
        },
    ),
    (
        "Jurídico",
        MarkerStyle {
            icon: "⚖️",
            color: "#8E24AA",
        },
    ),
    (
        "Pessoal",
        MarkerStyle {
            icon: "👥",
            color: "#00ACC1",
        },
    ),
    (
        "Concluído",
        MarkerStyle {
            icon: "✅",
            color: "#2E7D32",
        },
    ),
];

/// Resolves the display style for a marker label.
pub fn marker_style(marker: Option<&str>) -> MarkerStyle {
    let Some(marker) = marker else {
        return DEFAULT_MARKER_STYLE;
    };
    MARKER_STYLES
        .iter()
        .find(|(label, _)| *label == marker)
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_MARKER_STYLE)
}

#[cfg(test)]
mod tests {
    use super::{marker_style, DEFAULT_MARKER_STYLE, MARKER_AWAITING_RESPONSE, MARKER_STYLES};

    #[test]
    fn known_marker_resolves_its_style() {
        let style = marker_style(Some(MARKER_AWAITING_RESPONSE));
        assert_eq!(style.icon, "⏳");
        assert_ne!(style, DEFAULT_MARKER_STYLE);
    }

    #[test]
    fn unknown_or_missing_marker_falls_back_to_default() {
        assert_eq!(marker_style(Some("Unknown-Tag")), DEFAULT_MARKER_STYLE);
        assert_eq!(marker_style(None), DEFAULT_MARKER_STYLE);
        assert_eq!(DEFAULT_MARKER_STYLE.icon, "📁");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(marker_style(Some("urgente")), DEFAULT_MARKER_STYLE);
    }

    #[test]
    fn table_has_no_duplicate_labels() {
        let labels = MARKER_STYLES.iter().map(|(label, _)| *label).collect::<Vec<_>>();
        let mut deduped = labels.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(labels.len(), deduped.len());
    }
}
