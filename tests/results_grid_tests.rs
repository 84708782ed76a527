#[cfg(test)]
mod results_grid_tests {
    use sqlprint::results_grid::ResultsGrid;

    #[test]
    fn test_results_grid_rendering() {
        let mut grid = ResultsGrid::new();
        grid.set_headers(vec!["ID".to_string(), "Name".to_string()]);
        grid.add_row(vec!["1".to_string(), "Alice".to_string()]);
        grid.add_row(vec!["2".to_string(), "Bob".to_string()]);

        let rendered = grid.render();
        let expected = "\
+----+-------+
| ID | Name  |
+----+-------+
| 1  | Alice |
| 2  | Bob   |
+----+-------+
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_results_grid_wide_header() {
        let mut grid = ResultsGrid::new();
        grid.set_headers(vec!["affected_rows".to_string()]);
        grid.add_row(vec!["7".to_string()]);

        let rendered = grid.render();
        assert!(rendered.contains("| affected_rows |"));
        assert!(rendered.contains("| 7             |"));
    }

    #[test]
    fn test_results_grid_extra_cells_are_dropped() {
        let mut grid = ResultsGrid::new();
        grid.set_headers(vec!["a".to_string()]);
        grid.add_row(vec!["x".to_string(), "overflow".to_string()]);

        let rendered = grid.render();
        assert!(rendered.contains("| x |"));
        assert!(!rendered.contains("overflow"));
    }
}
