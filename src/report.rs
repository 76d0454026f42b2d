//! Display strings for fit results and axis labels.

use crate::data::model::AxisMeta;
use crate::data::regression::FitResult;

/// Unit suffix of the slope: `" yu / xu"`, `" yu"`, `" / xu"` or nothing.
fn slope_unit(x_unit: &str, y_unit: &str) -> String {
    match (x_unit.is_empty(), y_unit.is_empty()) {
        (false, false) => format!(" {y_unit} / {x_unit}"),
        (true, false) => format!(" {y_unit}"),
        (false, true) => format!(" / {x_unit}"),
        (true, true) => String::new(),
    }
}

/// `"(a ± da) yu / xu"`
pub fn slope_text(fit: &FitResult, x: &AxisMeta, y: &AxisMeta, decimals: usize) -> String {
    format!(
        "({:.prec$} ± {:.prec$}){}",
        fit.slope,
        fit.slope_error,
        slope_unit(&x.unit, &y.unit),
        prec = decimals
    )
}

/// `"(b ± db) yu"`
pub fn intercept_text(fit: &FitResult, y: &AxisMeta, decimals: usize) -> String {
    let unit = if y.unit.is_empty() {
        String::new()
    } else {
        format!(" {}", y.unit)
    };
    format!(
        "({:.prec$} ± {:.prec$}){unit}",
        fit.intercept,
        fit.intercept_error,
        prec = decimals
    )
}

/// Plot axis label: the long name if set, else the symbol, then `[unit]`.
pub fn axis_label(meta: &AxisMeta) -> String {
    let title = if meta.name.is_empty() {
        &meta.symbol
    } else {
        &meta.name
    };
    match (title.is_empty(), meta.unit.is_empty()) {
        (_, true) => title.clone(),
        (true, false) => format!("[{}]", meta.unit),
        (false, false) => format!("{title} [{}]", meta.unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(name: &str, symbol: &str, unit: &str) -> AxisMeta {
        AxisMeta {
            name: name.into(),
            symbol: symbol.into(),
            unit: unit.into(),
        }
    }

    fn sample_fit() -> FitResult {
        FitResult {
            slope: 2.0,
            intercept: -0.5,
            slope_error: 0.01234,
            intercept_error: 0.2,
            n: 5,
            r: 0.99,
        }
    }

    #[test]
    fn slope_units_cover_all_combinations() {
        let f = sample_fit();
        let x = meta("", "t", "s");
        let y = meta("", "d", "m");
        let none = meta("", "a", "");
        assert_eq!(slope_text(&f, &x, &y, 3), "(2.000 ± 0.012) m / s");
        assert_eq!(slope_text(&f, &none, &y, 3), "(2.000 ± 0.012) m");
        assert_eq!(slope_text(&f, &x, &none, 3), "(2.000 ± 0.012) / s");
        assert_eq!(slope_text(&f, &none, &none, 1), "(2.0 ± 0.0)");
    }

    #[test]
    fn intercept_uses_y_unit() {
        let f = sample_fit();
        assert_eq!(intercept_text(&f, &meta("", "d", "m"), 2), "(-0.50 ± 0.20) m");
        assert_eq!(intercept_text(&f, &meta("", "d", ""), 2), "(-0.50 ± 0.20)");
    }

    #[test]
    fn undefined_errors_render_as_nan() {
        let f = FitResult {
            slope_error: f64::NAN,
            ..sample_fit()
        };
        assert_eq!(slope_text(&f, &meta("", "x", ""), &meta("", "y", ""), 3), "(2.000 ± NaN)");
    }

    #[test]
    fn labels_prefer_name_over_symbol() {
        assert_eq!(axis_label(&meta("Temperature", "T", "K")), "Temperature [K]");
        assert_eq!(axis_label(&meta("", "T", "K")), "T [K]");
        assert_eq!(axis_label(&meta("", "T", "")), "T");
        assert_eq!(axis_label(&meta("", "", "K")), "[K]");
    }
}
