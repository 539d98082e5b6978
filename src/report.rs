// src/report.rs
use chrono::{Local, NaiveDateTime};

use crate::shared::config::ReportSettings;
use crate::shared::types::{NewPlan, PriceChange};
use crate::shared::utils::{escape_html, format_price};

const SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━━";
const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Telegram report for one scan
#[derive(Debug, Clone)]
pub struct PriceReport<'a> {
    pub changes: &'a [PriceChange],
    pub new_plans: &'a [NewPlan],
    pub categories: usize,
    pub platforms: usize,
    /// Categories whose verification failed; never reported as unchanged
    pub failed_categories: &'a [String],
    pub generated_at: NaiveDateTime,
}

impl<'a> PriceReport<'a> {
    pub fn new(
        changes: &'a [PriceChange],
        new_plans: &'a [NewPlan],
        categories: usize,
        platforms: usize,
    ) -> Self {
        Self {
            changes,
            new_plans,
            categories,
            platforms,
            failed_categories: &[],
            generated_at: Local::now().naive_local(),
        }
    }

    pub fn with_failed_categories(mut self, failed_categories: &'a [String]) -> Self {
        self.failed_categories = failed_categories;
        self
    }

    pub fn with_generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Render the HTML message; the two templates are mutually exclusive
    pub fn render(&self, settings: &ReportSettings) -> String {
        if self.changes.is_empty() && self.new_plans.is_empty() {
            self.render_unchanged(settings)
        } else {
            self.render_changes(settings)
        }
    }

    fn render_unchanged(&self, settings: &ReportSettings) -> String {
        let (icon, status) = if self.failed_categories.is_empty() {
            ("🟢", "✅ <b>Sin cambios detectados</b>".to_string())
        } else {
            ("🟡", format!("⚠️ <b>Verificación incompleta</b>\n{}", self.unverified_line()))
        };

        format!(
            "{icon} <b>SubsFly Price Monitor</b>\n\
             {SEPARATOR}\n\
             📅 {date}\n\
             \n\
             {status}\n\
             \n\
             📊 Categorías: {cats} | Plataformas: {plats}\n\
             \n\
             Próxima verificación: en {days} días",
            date = self.generated_at.format(DATE_FORMAT),
            cats = self.categories,
            plats = self.platforms,
            days = settings.next_check_days,
        )
    }

    fn render_changes(&self, settings: &ReportSettings) -> String {
        let mut msg = format!(
            "🔴 <b>SubsFly Price Monitor</b>\n\
             {SEPARATOR}\n\
             📅 {date}\n\
             \n\
             ⚠️ <b>CAMBIOS: {count}</b>\n\
             \n",
            date = self.generated_at.format(DATE_FORMAT),
            count = self.changes.len(),
        );

        for change in self.changes {
            msg.push_str(&format_change(change));
            msg.push_str("\n\n");
        }

        if !self.new_plans.is_empty() {
            msg.push_str("🆕 <b>Nuevos planes:</b>\n");
            for plan in self.new_plans {
                msg.push_str(&format_new_plan(plan));
                msg.push('\n');
            }
        }

        if !self.failed_categories.is_empty() {
            msg.push('\n');
            msg.push_str(&self.unverified_line());
            msg.push('\n');
        }

        msg.push_str(&format!("\n{SEPARATOR}\n{}", escape_html(&settings.action_hint)));
        msg
    }

    fn unverified_line(&self) -> String {
        let names: Vec<String> = self.failed_categories.iter().map(|c| escape_html(c)).collect();
        format!("⚠️ No verificadas: {}", names.join(", "))
    }
}

/// Three-line block for one change: name, old → new, signed deltas
pub fn format_change(change: &PriceChange) -> String {
    let (icon, sign) = if change.is_increase { ("📈", "+") } else { ("📉", "") };
    format!(
        "{icon} <b>{name}</b>\n   {old}€ → {new}€\n   {sign}{amount:.2}€ ({sign}{percent:.1}%)",
        name = escape_html(&change.name),
        old = format_price(change.old_price),
        new = format_price(change.new_price),
        amount = change.change_amount,
        percent = change.change_percent,
    )
}

pub fn format_new_plan(plan: &NewPlan) -> String {
    format!(
        "• {}: {}€",
        escape_html(plan.name.as_deref().unwrap_or("N/A")),
        escape_html(plan.price.as_deref().unwrap_or("N/A")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    fn netflix_increase() -> PriceChange {
        PriceChange {
            name: "Netflix".to_string(),
            category: "Streaming".to_string(),
            old_price: 12.99,
            new_price: 15.99,
            change_amount: 3.0,
            change_percent: 23.094688221709,
            is_increase: true,
        }
    }

    fn spotify_decrease() -> PriceChange {
        PriceChange {
            name: "Spotify".to_string(),
            category: "Music".to_string(),
            old_price: 11.0,
            new_price: 9.99,
            change_amount: 9.99 - 11.0,
            change_percent: (9.99 - 11.0) / 11.0 * 100.0,
            is_increase: false,
        }
    }

    #[test]
    fn test_unchanged_report() {
        let settings = ReportSettings::default();
        let report = PriceReport::new(&[], &[], 4, 23).with_generated_at(fixed_time());
        let text = report.render(&settings);

        assert!(text.starts_with("🟢 <b>SubsFly Price Monitor</b>"));
        assert!(text.contains("📅 07/03/2025 09:05"));
        assert!(text.contains("✅ <b>Sin cambios detectados</b>"));
        assert!(text.contains("📊 Categorías: 4 | Plataformas: 23"));
        assert!(text.ends_with("Próxima verificación: en 7 días"));
        assert!(!text.contains("CAMBIOS"));
    }

    #[test]
    fn test_changes_report_lines() {
        let settings = ReportSettings::default();
        let changes = vec![netflix_increase(), spotify_decrease()];
        let text = PriceReport::new(&changes, &[], 2, 5)
            .with_generated_at(fixed_time())
            .render(&settings);

        assert!(text.starts_with("🔴 <b>SubsFly Price Monitor</b>"));
        assert!(text.contains("⚠️ <b>CAMBIOS: 2</b>"));
        assert!(text.contains("📈 <b>Netflix</b>\n   12.99€ → 15.99€\n   +3.00€ (+23.1%)"));
        assert!(text.contains("📉 <b>Spotify</b>\n   11.0€ → 9.99€\n   -1.01€ (-9.2%)"));
        assert!(!text.contains("Nuevos planes"));
        assert!(!text.contains("Sin cambios"));
        assert!(text.ends_with(&format!("\n{SEPARATOR}\n⚡ Actualiza CloudKit")));
    }

    #[test]
    fn test_new_plans_only_uses_changes_template() {
        let settings = ReportSettings::default();
        let plans = vec![
            NewPlan {
                name: Some("Disney+ Básico".to_string()),
                price: Some("5.99".to_string()),
                ..Default::default()
            },
            NewPlan::default(),
        ];
        let text = PriceReport::new(&[], &plans, 1, 3)
            .with_generated_at(fixed_time())
            .render(&settings);

        assert!(text.contains("⚠️ <b>CAMBIOS: 0</b>"));
        assert!(text.contains("🆕 <b>Nuevos planes:</b>\n• Disney+ Básico: 5.99€\n• N/A: N/A€\n"));
    }

    #[test]
    fn test_report_escapes_markup() {
        let mut change = netflix_increase();
        change.name = "AT&T <TV>".to_string();
        let block = format_change(&change);
        assert!(block.contains("<b>AT&amp;T &lt;TV&gt;</b>"));
    }

    #[test]
    fn test_report_uses_configured_hints() {
        let settings = ReportSettings {
            next_check_days: 14,
            action_hint: "Revisa el catálogo".to_string(),
        };
        let unchanged = PriceReport::new(&[], &[], 1, 1)
            .with_generated_at(fixed_time())
            .render(&settings);
        assert!(unchanged.contains("en 14 días"));

        let changes = vec![netflix_increase()];
        let changed = PriceReport::new(&changes, &[], 1, 1)
            .with_generated_at(fixed_time())
            .render(&settings);
        assert!(changed.ends_with("Revisa el catálogo"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let settings = ReportSettings::default();
        let changes = vec![netflix_increase()];
        let a = PriceReport::new(&changes, &[], 1, 1).with_generated_at(fixed_time()).render(&settings);
        let b = PriceReport::new(&changes, &[], 1, 1).with_generated_at(fixed_time()).render(&settings);
        assert_eq!(a, b);
    }

    #[test]
    fn test_failed_categories_are_never_reported_as_unchanged() {
        let settings = ReportSettings::default();
        let failed = vec!["Streaming".to_string(), "Música".to_string()];
        let text = PriceReport::new(&[], &[], 2, 5)
            .with_failed_categories(&failed)
            .with_generated_at(fixed_time())
            .render(&settings);

        assert!(text.starts_with("🟡 <b>SubsFly Price Monitor</b>"));
        assert!(!text.contains("Sin cambios detectados"));
        assert!(text.contains("⚠️ <b>Verificación incompleta</b>\n⚠️ No verificadas: Streaming, Música"));
        assert!(text.contains("📊 Categorías: 2 | Plataformas: 5"));
    }

    #[test]
    fn test_changes_report_lists_failed_categories() {
        let settings = ReportSettings::default();
        let changes = vec![netflix_increase()];
        let failed = vec!["Cloud <EU>".to_string()];
        let text = PriceReport::new(&changes, &[], 2, 3)
            .with_failed_categories(&failed)
            .with_generated_at(fixed_time())
            .render(&settings);

        assert!(text.contains("⚠️ No verificadas: Cloud &lt;EU&gt;\n"));
        assert!(text.ends_with("⚡ Actualiza CloudKit"));
    }
}
