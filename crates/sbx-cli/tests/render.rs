//! Terminal tables.

use sbx_cli::render::{catalogue_table, metrics_table, sbox_table};
use sbx_model::{ArtifactSummary, MetricSet, SubstitutionTable};
use sbx_workflow::TableView;

fn metrics() -> MetricSet {
    MetricSet {
        nl: 112,
        sac: 0.5078,
        bic_nl: 112,
        bic_sac: 0.5046,
        lap: 0.0625,
        dap: 0.015625,
        du: 4,
        ad: 7,
        to: 7.8601,
        ci: 0,
    }
}

#[test]
fn catalogue_lists_every_entry() {
    let entries = vec![
        ArtifactSummary {
            id: "aes".to_string(),
            name: "AES".to_string(),
            author: Some("Daemen, Rijmen".to_string()),
            tags: vec!["standard".to_string()],
            status: "verified".to_string(),
            has_matrix: true,
        },
        ArtifactSummary {
            id: "k44".to_string(),
            name: "K44".to_string(),
            author: None,
            tags: Vec::new(),
            status: "placeholder".to_string(),
            has_matrix: false,
        },
    ];

    let mut table = catalogue_table(&entries);
    table.force_no_tty();
    let text = table.to_string();

    assert_eq!(table.row_iter().count(), 2);
    assert!(text.contains("Daemen, Rijmen"), "{text}");
    assert!(text.contains("k44"), "{text}");
}

#[test]
fn metrics_table_shows_all_ten_metrics() {
    let mut table = metrics_table(&metrics());
    table.force_no_tty();
    let text = table.to_string();

    assert_eq!(table.row_iter().count(), 10);
    for name in ["NL", "SAC", "BIC-NL", "BIC-SAC", "LAP", "DAP", "DU", "AD", "TO", "CI"] {
        assert!(text.contains(name), "missing {name}");
    }
    assert!(text.contains("0.5078"), "{text}");
}

#[test]
fn sbox_table_follows_view() {
    let table = SubstitutionTable::identity();

    let mut engineering = sbox_table(&TableView::Engineering.render(&table));
    engineering.force_no_tty();
    let mut paper = sbox_table(&TableView::Paper.render(&table));
    paper.force_no_tty();

    assert_eq!(engineering.row_iter().count(), 16);
    assert_eq!(paper.row_iter().count(), 16);
    assert!(engineering.to_string().contains("FF"));
    assert!(paper.to_string().contains("255"));
    assert!(!paper.to_string().contains("FF"));
}
