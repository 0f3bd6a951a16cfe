use canon_rename::transform::{is_canonical, transform};

#[test]
fn transform_is_idempotent() {
    let names = [
        "Báo cáo-tháng 3",
        "Đà Nẵng",
        "résumé final.docx",
        "already_OK",
        "mixed-Case name.TAR.GZ",
        "ﬁle",
        "Ω-Ä",
        "",
    ];
    for n in names {
        for replace in [true, false] {
            let once = transform(n, replace);
            assert_eq!(transform(&once, replace), once, "not idempotent for {n:?}");
            assert!(is_canonical(&once, replace));
        }
    }
}

#[test]
fn canonical_names_are_fixed_points() {
    for n in ["ABC", "A_B", "X_1", "REPORT.PDF", "2024_Q1"] {
        assert_eq!(transform(n, true), n);
    }
}

#[test]
fn documented_examples() {
    assert_eq!(transform("Hồ sơ-2024", true), "HO_SO_2024");
    assert_eq!(transform("Hồ sơ-2024", false), "HO SO_2024");
    assert_eq!(transform("đi-Đến", true), "DI_DEN");
}
