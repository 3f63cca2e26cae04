use poster_layout::layout::{minimum_sheets, sheets_needed, uncovered_region};
use poster_layout::Strategy as Tiling;
use poster_layout::*;
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn dimension(min: f64, max: f64) -> impl Strategy<Value = Dimension> {
    (min..max, min..max).prop_map(|(width, height)| Dimension::new(width, height))
}

fn relative_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs())
}

proptest! {
    #[test]
    fn simple_cover_covers_poster(
        poster in dimension(10.0, 2000.0),
        printable in dimension(20.0, 400.0),
    ) {
        let cover = simple_cover(poster, printable).unwrap();
        let cell = cover.grid.orientation.apply(printable);

        prop_assert!(uncovered_region(poster, printable, &cover.placements).is_none());
        prop_assert_eq!(
            cover.sheet_count(),
            sheets_needed(poster.width, cell.width) * sheets_needed(poster.height, cell.height)
        );
        prop_assert!(cover.covered().width >= poster.width - 1e-6);
        prop_assert!(cover.covered().height >= poster.height - 1e-6);
    }

    #[test]
    fn resolver_multiplier_round_trip(
        source in dimension(50.0, 1000.0),
        factor in 0.1f64..50.0,
    ) {
        let sheet = PaperSize::A4.dimensions_mm();
        let resolution = resolve(
            &SizingSpec::AreaMultiplier(factor),
            source,
            sheet,
            Border::uniform(20.0),
            Tiling::Simple,
        ).unwrap();

        prop_assert!(relative_eq(resolution.multiplier, factor));
        prop_assert!(relative_eq(
            resolution.poster.area() / source.area(),
            factor
        ));
        prop_assert!(relative_eq(
            resolution.poster.width / resolution.poster.height,
            source.width / source.height
        ));
    }

    #[test]
    fn fit_to_box_and_multiplier_agree(
        source in dimension(50.0, 1000.0),
        bounds in dimension(100.0, 2000.0),
    ) {
        let sheet = PaperSize::A4.dimensions_mm();
        let border = Border::uniform(20.0);
        let fitted = resolve(
            &SizingSpec::FitToBox { max_width: bounds.width, max_height: bounds.height },
            source,
            sheet,
            border,
            Tiling::Simple,
        ).unwrap();
        let scaled = resolve(
            &SizingSpec::AreaMultiplier(fitted.multiplier),
            source,
            sheet,
            border,
            Tiling::Simple,
        ).unwrap();

        prop_assert!(relative_eq(fitted.poster.width, scaled.poster.width));
        prop_assert!(relative_eq(fitted.poster.height, scaled.poster.height));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn complex_never_worse_than_simple(
        poster in dimension(100.0, 900.0),
        printable in dimension(100.0, 300.0),
    ) {
        let simple = simple_cover(poster, printable).unwrap();
        let complex = complex_cover(poster, printable).unwrap();

        prop_assert!(complex.len() <= simple.sheet_count());
        prop_assert!(complex.len() >= minimum_sheets(poster, printable));
        prop_assert!(uncovered_region(poster, printable, &complex).is_none());
    }

    #[test]
    fn complex_keeps_optimal_simple_count(
        columns in 1usize..5,
        rows in 1usize..5,
        printable in dimension(100.0, 300.0),
    ) {
        // a poster exactly one grid large is optimal already
        let poster = Dimension::new(
            columns as f64 * printable.width,
            rows as f64 * printable.height,
        );
        let minimum = minimum_sheets(poster, printable);
        prop_assume!(simple_cover(poster, printable).unwrap().sheet_count() == minimum);

        prop_assert_eq!(complex_cover(poster, printable).unwrap().len(), minimum);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn bisection_respects_sheet_budget(
        sheets in 1usize..10,
        source in dimension(100.0, 400.0),
    ) {
        let sheet = PaperSize::A4.dimensions_mm();
        let border = Border::uniform(15.0);
        let spec = SizingSpec::MaxSheetCount(sheets);

        let simple = resolve(&spec, source, sheet, border, Tiling::Simple).unwrap();
        let complex = resolve(&spec, source, sheet, border, Tiling::Complex).unwrap();

        prop_assert!(simple.sheet_count <= sheets);
        prop_assert!(complex.sheet_count <= sheets);
        prop_assert!(complex.poster.area() >= simple.poster.area() * (1.0 - 1e-9));
    }
}
