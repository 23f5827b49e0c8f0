// crates/fl1-i18n/src/tests/support.rs
// ============================================================================
// Module: i18n Test Fixtures
// Description: In-memory catalogs shared by i18n unit tests.
// ============================================================================

use serde_json::json;

use crate::catalog::CatalogSet;
use crate::catalog::MessageCatalog;
use crate::locale::Locale;

/// Builds a catalog set where Italian is deliberately incomplete.
pub(super) fn fixture_catalogs() -> CatalogSet {
    let cs = json!({
        "common": {"nav": {"home": "Domů", "about": "O nás", "contact": "Kontakt"}},
        "home": {
            "hero": {
                "title": {"main": "Vaše partnerství s", "highlight": "Odoo Magic"},
                "features": ["Rychlá implementace", "Řešení na míru"]
            },
            "stats": {"years": 10, "remote": true}
        },
        "footer": {"copyright": "© {year} FL1. Všechna práva vyhrazena."}
    });
    let en = json!({
        "common": {"nav": {"home": "Home", "about": "About", "contact": "Contact"}},
        "home": {
            "hero": {
                "title": {"main": "Your partnership with", "highlight": "Odoo Magic"},
                "features": ["Fast implementation", "Custom solutions"]
            },
            "stats": {"years": 10, "remote": true}
        },
        "footer": {"copyright": "© {year} FL1. All rights reserved."}
    });
    let it = json!({
        "common": {"nav": {"home": "Home", "about": "", "contact": "Contatti"}},
        "home": {
            "hero": {
                "title": {"main": "La tua partnership con"},
                "features": "Implementazione rapida"
            },
            "stats": {"years": 10, "remote": true}
        },
        "footer": {"copyright": "© {year} FL1. Tutti i diritti riservati."},
        "legacy": {"banner": "Vecchio banner"}
    });
    CatalogSet::from_catalogs([
        MessageCatalog::from_value(Locale::Cs, cs).unwrap(),
        MessageCatalog::from_value(Locale::En, en).unwrap(),
        MessageCatalog::from_value(Locale::It, it).unwrap(),
    ])
    .unwrap()
}
