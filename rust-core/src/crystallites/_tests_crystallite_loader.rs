#[cfg(test)]
mod _tests_crystallite_loader {
    use super::super::catalog::CrystalliteCatalog;
    use super::super::crystallite_loader::*;
    use crate::error::CrystalliteError;
    use crate::interfaces::{ColumnLayout, Verbosity};
    use approx::assert_relative_eq;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const THREE_RECORDS: &str = "3\n10 20 0.5\n30 40 0.3\n50 60 0.2\n";

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn load(path: &Path, from: i64, to: i64) -> Result<crate::crystallites::OrientationSet, CrystalliteError> {
        CrystalliteLoader::new(CrystalliteCatalog::new()).load(
            path.to_str().unwrap(),
            from,
            to,
            Verbosity::Quiet,
        )
    }

    fn assert_config_error_at(err: CrystalliteError, expected_line: usize) {
        match err {
            CrystalliteError::Config { line, .. } => assert_eq!(line, Some(expected_line)),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    // ==================== Range resolution ====================

    #[test]
    fn test_range_resolution() {
        assert_eq!(
            CrystalliteRange::resolve("grid", 1, 3, 3).unwrap(),
            CrystalliteRange { from: 1, to: 3 }
        );
        assert_eq!(CrystalliteRange::resolve("grid", 2, 10, 3).unwrap().to, 3);
        assert_eq!(CrystalliteRange::resolve("grid", 2, -1, 3).unwrap().to, 3);
        assert_eq!(CrystalliteRange::resolve("grid", 3, 3, 3).unwrap().len(), 1);

        for (from, to) in [(4, 4), (0, 3), (-2, 3), (3, 2), (1, 0)] {
            let err = CrystalliteRange::resolve("grid", from, to, 3).unwrap_err();
            assert!(
                matches!(err, CrystalliteError::Range { available: 3, .. }),
                "from={} to={} gave {:?}",
                from,
                to,
                err
            );
        }
    }

    // ==================== External files ====================

    #[test]
    fn test_three_column_file_full_range() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "grid.cry", THREE_RECORDS);

        let set = load(&path, 1, 3).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.layout(), ColumnLayout::AlphaBetaWeight);

        let expected = [(10.0, 20.0, 0.5), (30.0, 40.0, 0.3), (50.0, 60.0, 0.2)];
        for (c, (alpha, beta, weight)) in set.iter().zip(expected) {
            assert_eq!(c.alpha, alpha);
            assert_eq!(c.beta, beta);
            assert_eq!(c.gamma, 0.0);
            assert_eq!(c.weight, weight);
        }
        assert_relative_eq!(set.sum_weights(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_partial_range_skips_leading_records() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "grid.cry", THREE_RECORDS);

        let set = load(&path, 2, 3).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().alpha, 30.0);
        assert_eq!(set.get(2).unwrap().alpha, 50.0);
        assert_eq!(set.get(2).unwrap().weight, 0.2);
    }

    #[test]
    fn test_upper_bound_is_clamped() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "grid.cry", THREE_RECORDS);

        assert_eq!(load(&path, 2, 100).unwrap().len(), 2);
        assert_eq!(load(&path, 1, -1).unwrap().len(), 3);
    }

    #[test]
    fn test_range_errors_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "grid.cry", THREE_RECORDS);

        assert!(matches!(load(&path, 4, 5), Err(CrystalliteError::Range { .. })));
        assert!(matches!(load(&path, 0, 3), Err(CrystalliteError::Range { .. })));
        assert!(matches!(load(&path, 3, 2), Err(CrystalliteError::Range { .. })));
    }

    #[test]
    fn test_four_column_file_reads_gamma() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "grid.cry", "2\n0 90 45 0.25\n180 90 135 0.75\n");

        let set = load(&path, 1, -1).unwrap();
        assert_eq!(set.layout(), ColumnLayout::AlphaBetaGammaWeight);
        assert_eq!(set.get(1).unwrap().gamma, 45.0);
        assert_eq!(set.get(2).unwrap().gamma, 135.0);
        assert_eq!(set.get(2).unwrap().weight, 0.75);
    }

    #[test]
    fn test_zero_weight_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "grid.cry", "3\n10 20 0.5\n30 40 0.0\n50 60 0.5\n");

        let err = load(&path, 1, 3).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("crystallite number 2"), "{}", message);
        assert!(message.contains("zero weight"), "{}", message);
        assert_config_error_at(err, 3);
    }

    #[test]
    fn test_zero_weight_in_four_column_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "grid.cry", "2\n10 20 30 0\n30 40 50 1\n");
        assert_config_error_at(load(&path, 1, 2).unwrap_err(), 2);
    }

    #[test]
    fn test_mixed_column_counts_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "grid.cry", "3\n10 20 0.5\n30 40 0 0.3\n50 60 0.2\n");
        assert_config_error_at(load(&path, 1, 3).unwrap_err(), 3);

        // The first record of the slice fixes the layout
        assert_eq!(load(&path, 2, 2).unwrap().layout(), ColumnLayout::AlphaBetaGammaWeight);
    }

    #[test]
    fn test_wrong_column_counts_are_rejected() {
        let dir = TempDir::new().unwrap();
        let two = write_file(dir.path(), "two.cry", "1\n10 20\n");
        assert_config_error_at(load(&two, 1, 1).unwrap_err(), 2);

        let five = write_file(dir.path(), "five.cry", "1\n10 20 30 40 0.5\n");
        assert_config_error_at(load(&five, 1, 1).unwrap_err(), 2);

        let text = write_file(dir.path(), "text.cry", "1\n10 twenty 0.5\n");
        let err = load(&text, 1, 1).unwrap_err();
        assert!(err.to_string().contains("'twenty'"));
        assert_config_error_at(err, 2);
    }

    #[test]
    fn test_bad_header_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "grid.cry", "three\n10 20 1\n");
        assert_config_error_at(load(&path, 1, 1).unwrap_err(), 1);
    }

    #[test]
    fn test_truncated_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "grid.cry", "4\n10 20 0.5\n30 40 0.5\n");

        match load(&path, 1, 4) {
            Err(CrystalliteError::Io { source, .. }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::UnexpectedEof)
            }
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_extension_fallback() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "rep10.cry", THREE_RECORDS);

        let set = load(&dir.path().join("rep10"), 1, -1).unwrap();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_literal_name_wins_over_extension() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "rep", "1\n1 2 1\n");
        write_file(dir.path(), "rep.cry", THREE_RECORDS);

        assert_eq!(load(&dir.path().join("rep"), 1, -1).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        match load(&dir.path().join("nothing"), 1, -1) {
            Err(CrystalliteError::Io { origin, .. }) => assert!(origin.ends_with("nothing.cry")),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    // ==================== Built-in catalog ====================

    #[test]
    fn test_builtin_table_full_range() {
        let loader = CrystalliteLoader::default();
        let set = loader.load("zcw144", 1, -1, Verbosity::Quiet).unwrap();
        assert_eq!(set.len(), 144);
        assert!(set.iter().all(|c| c.gamma == 0.0));
        assert_relative_eq!(set.sum_weights(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_builtin_table_slice() {
        let loader = CrystalliteLoader::default();
        let full = loader.load("zcw21", 1, 21, Verbosity::Quiet).unwrap();
        let slice = loader.load("zcw21", 5, 8, Verbosity::Powder).unwrap();
        assert_eq!(slice.len(), 4);
        assert_eq!(slice.as_slice(), &full.as_slice()[4..8]);

        assert!(matches!(
            loader.load("zcw21", 22, -1, Verbosity::Quiet),
            Err(CrystalliteError::Range { available: 21, .. })
        ));
    }

    #[test]
    fn test_injected_catalog_is_used() {
        let catalog = CrystalliteCatalog::new()
            .with_table("pair", vec![(0.0, 0.0, 0.5), (0.0, 90.0, 0.5)])
            .with_table("broken", vec![(0.0, 0.0, 1.0), (0.0, 90.0, 0.0)]);
        let loader = CrystalliteLoader::new(catalog);

        let pair = loader.load("pair", 1, -1, Verbosity::Quiet).unwrap();
        assert_eq!(pair.len(), 2);
        assert_eq!(pair.get(2).unwrap().beta, 90.0);

        let err = loader.load("broken", 1, -1, Verbosity::Quiet).unwrap_err();
        assert!(err.to_string().contains("'broken' has zero weight"));
        assert_config_error_at(err, 2);

        // The zero weight lies outside this slice
        assert_eq!(loader.load("broken", 1, 1, Verbosity::Quiet).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_utf8_record_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.cry");
        fs::write(&path, b"1\n10 \xff 1\n").unwrap();

        let err = load(&path, 1, -1).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
        assert_config_error_at(err, 2);
    }

    #[test]
    fn test_path_prefix_bypasses_catalog() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "pair", THREE_RECORDS);
        let catalog = CrystalliteCatalog::new().with_table("pair", vec![(0.0, 0.0, 1.0)]);
        let loader = CrystalliteLoader::new(catalog);

        assert_eq!(loader.load("pair", 1, -1, Verbosity::Quiet).unwrap().len(), 1);
        let external = loader
            .load(path.to_str().unwrap(), 1, -1, Verbosity::Quiet)
            .unwrap();
        assert_eq!(external.len(), 3);
    }
}
