use std::{
    fmt::{self, Write},
    sync::Arc,
};

use ledger_store::{StatusKind, StatusMessage};
use ledger_types::{AssetList, AssetRecord, Month, format_count, format_money, format_rate};
use ledger_view::DerivedView;

pub const LOADING_PLACEHOLDER: &str = "Cargando base de datos...";
const NO_DESCRIPTION: &str = "Sin descripción";

/// Everything one frame of the console shows.
#[derive(Debug, Clone)]
pub struct Screen {
    pub list: Arc<AssetList>,
    pub view: DerivedView,
    pub query: String,
    pub loading: bool,
    pub requesting: Option<Month>,
    pub selected_month: Option<Month>,
    pub dataset_month: Option<Month>,
    pub status: Option<StatusMessage>,
}

/// `Mostrando 1 - 50 de 1,234 registros`, with `(Filtrado)` while a query is
/// active.
pub fn footer_label(view: &DerivedView, filtered: bool) -> String {
    let (first, last) = if view.visible.is_empty() {
        (0, 0)
    } else {
        (view.visible.start + 1, view.visible.end)
    };
    let mut label = format!(
        "Mostrando {first} - {last} de {} registros",
        format_count(view.filtered.len())
    );
    if filtered {
        label.push_str(" (Filtrado)");
    }
    label
}

pub fn page_label(view: &DerivedView) -> String {
    format!(
        "Página {} / {}",
        view.current_page,
        format_count(view.total_pages)
    )
}

/// Describes the highlighted month and whether the data actually reflects it.
pub fn month_label(selected: Option<Month>, dataset: Option<Month>) -> Option<String> {
    let selected = selected?;
    let note = match dataset {
        Some(month) if month == selected => return Some(format!("Mes seleccionado: {selected}")),
        Some(month) => format!("datos calculados hasta {month}"),
        None => "datos sin recalcular".to_string(),
    };
    Some(format!("Mes seleccionado: {selected} ({note})"))
}

impl Screen {
    fn write_header(&self, out: &mut impl Write) -> fmt::Result {
        let count = if self.list.is_empty() {
            "...".to_string()
        } else {
            format_count(self.list.len())
        };
        write!(out, "Sistema de Activos Fijos | Base de Datos: {count} registros")?;
        if self.loading {
            out.write_str(" | Cargando...")?;
        }
        if let Some(month) = self.requesting {
            write!(out, " | Calculando hasta {month}...")?;
        }
        writeln!(out)?;

        if !self.query.is_empty() {
            writeln!(out, "Filtro: \"{}\"", self.query)?;
        }
        if let Some(label) = month_label(self.selected_month, self.dataset_month) {
            writeln!(out, "{label}")?;
        }
        Ok(())
    }

    fn write_totals(&self, out: &mut impl Write) -> fmt::Result {
        let totals = self.view.filtered.totals();
        writeln!(
            out,
            "Valor Histórico: {} | Acum. Inicio: {} | Total Año: {} | Total Acumulado: {} | Costo Neto: {}",
            format_money(Some(totals.historical_value)),
            format_money(Some(totals.opening_accumulated)),
            format_money(Some(totals.current_year_total)),
            format_money(Some(totals.accumulated_total)),
            format_money(Some(totals.net_cost)),
        )
    }

    fn write_table(&self, out: &mut impl Write) -> fmt::Result {
        if self.loading && self.list.is_empty() {
            return writeln!(out, "{LOADING_PLACEHOLDER}");
        }

        write!(
            out,
            "{:<16} {:<8} {:<24} {:>6} {:>14}",
            "Código", "CeCo", "Descripción", "Depre %", "Acum. Inicio"
        )?;
        for month in Month::ALL {
            if self.selected_month == Some(month) {
                write!(out, " {:>12}", format!("[{}]", month.label()))?;
            } else {
                write!(out, " {:>12}", month.label())?;
            }
        }
        writeln!(
            out,
            " {:>14} {:>14} {:>14} {:>14}",
            "Total Año", "Total Acum.", "Costo Neto", "Valor Histórico"
        )?;

        for asset in self.view.visible_records(&self.list) {
            write_row(out, asset)?;
        }
        Ok(())
    }

    fn write_footer(&self, out: &mut impl Write) -> fmt::Result {
        writeln!(
            out,
            "{} | {}",
            footer_label(&self.view, !self.query.is_empty()),
            page_label(&self.view)
        )?;
        if let Some(status) = &self.status {
            let marker = match status.kind {
                StatusKind::Success => "OK",
                StatusKind::Error => "ERROR",
            };
            writeln!(out, "[{marker}] {}", status.text)?;
        }
        Ok(())
    }
}

fn write_row(out: &mut impl Write, asset: &AssetRecord) -> fmt::Result {
    write!(
        out,
        "{:<16} {:<8} {:<24} {:>6} {:>14}",
        truncate(&asset.code, 16),
        asset.cost_center.as_deref().unwrap_or("-"),
        truncate(asset.description.as_deref().unwrap_or(NO_DESCRIPTION), 24),
        format_rate(asset.depreciation_rate),
        format_money(asset.opening_accumulated_depreciation),
    )?;
    for (_, amount) in asset.monthly_depreciation.iter() {
        write!(out, " {:>12}", format_money(amount))?;
    }
    writeln!(
        out,
        " {:>14} {:>14} {:>14} {:>14}",
        format_money(asset.total_depreciation_current_year),
        format_money(asset.total_accumulated_depreciation),
        format_money(asset.net_cost),
        format_money(asset.historical_value),
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        self.write_totals(f)?;
        self.write_table(f)?;
        self.write_footer(f)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ledger_view::{PageSize, ViewCache, ViewState};
    use rust_decimal::dec;
    use tokio::time::Instant;

    use super::*;

    fn screen(list: AssetList, state: &ViewState) -> Screen {
        let list = Arc::new(list);
        let view = ViewCache::new().derive(&list, state);
        Screen {
            list,
            view,
            query: state.query().to_string(),
            loading: false,
            requesting: None,
            selected_month: None,
            dataset_month: None,
            status: None,
        }
    }

    fn assets(len: usize) -> AssetList {
        AssetList::new(
            1,
            (0..len)
                .map(|i| AssetRecord::new(format!("AF-{i:04}")))
                .collect(),
        )
    }

    #[test]
    fn test_footer_labels() {
        let mut state = ViewState::default();
        state.set_page_size(PageSize::Twenty);
        state.paginator_mut().last_page(3);
        let screen = screen(assets(45), &state);

        assert_eq!(
            footer_label(&screen.view, false),
            "Mostrando 41 - 45 de 45 registros"
        );
        assert_eq!(page_label(&screen.view), "Página 3 / 3");
    }

    #[test]
    fn test_footer_marks_filter_and_empty_result() {
        let mut state = ViewState::default();
        state.set_query("zzz");
        let screen = screen(assets(3), &state);

        assert_eq!(
            footer_label(&screen.view, true),
            "Mostrando 0 - 0 de 0 registros (Filtrado)"
        );
        assert_eq!(page_label(&screen.view), "Página 1 / 0");
    }

    #[test]
    fn test_month_label_flags_mismatch() {
        assert_eq!(month_label(None, None), None);
        assert_eq!(
            month_label(Some(Month::Mar), Some(Month::Mar)).unwrap(),
            "Mes seleccionado: Mar"
        );
        assert_eq!(
            month_label(Some(Month::Mar), None).unwrap(),
            "Mes seleccionado: Mar (datos sin recalcular)"
        );
        assert_eq!(
            month_label(Some(Month::Mar), Some(Month::Feb)).unwrap(),
            "Mes seleccionado: Mar (datos calculados hasta Feb)"
        );
    }

    #[test]
    fn test_loading_placeholder_on_empty_set() {
        let mut screen = screen(AssetList::empty(), &ViewState::default());
        screen.loading = true;

        let text = screen.to_string();

        assert!(text.contains(LOADING_PLACEHOLDER));
        assert!(text.contains("Base de Datos: ... registros"));
    }

    #[test]
    fn test_render_rows_totals_and_status() {
        let mut asset = AssetRecord {
            cost_center: Some("CC7".to_string()),
            historical_value: Some(dec!(1234.5)),
            ..AssetRecord::new("AF-1")
        };
        asset.monthly_depreciation.set(Month::Mar, Some(dec!(15)));
        let mut screen = screen(AssetList::new(1, vec![asset]), &ViewState::default());
        screen.selected_month = Some(Month::Mar);
        screen.status = Some(StatusMessage {
            kind: StatusKind::Error,
            text: "Error al calcular.".to_string(),
            expires_at: Instant::now() + Duration::from_secs(5),
        });

        let text = screen.to_string();

        assert!(text.contains("Valor Histórico: 1,234.50"));
        assert!(text.contains("[Mar]"));
        assert!(text.contains("Sin descripción"));
        assert!(text.contains("15.00"));
        assert!(text.contains("Mostrando 1 - 1 de 1 registros | Página 1 / 1"));
        assert!(text.contains("[ERROR] Error al calcular."));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 8), "short");
        assert_eq!(truncate("a long description", 8), "a long ~");
    }
}
