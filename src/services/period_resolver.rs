// src/services/period_resolver.rs

use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};

use crate::{
    common::error::AppError,
    models::{
        dashboard::PeriodSelector,
        period::{DateRange, ResolvedPeriod},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodToken {
    Week,
    Month,
    Quarter,
    Year,
}

impl FromStr for PeriodToken {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(PeriodToken::Week),
            "month" => Ok(PeriodToken::Month),
            "quarter" => Ok(PeriodToken::Quarter),
            "year" => Ok(PeriodToken::Year),
            other => Err(AppError::invalid_period(format!(
                "Período desconhecido '{}'. Use week, month, quarter ou year.",
                other
            ))),
        }
    }
}

impl PeriodToken {
    /// Início do período que termina em `now`.
    fn start_from(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            PeriodToken::Week => now.checked_sub_signed(Duration::days(7)),
            PeriodToken::Month => now.checked_sub_months(Months::new(1)),
            PeriodToken::Quarter => now.checked_sub_months(Months::new(3)),
            PeriodToken::Year => now.checked_sub_months(Months::new(12)),
        }
    }
}

// Único ponto que calcula "período anterior comparável".
// Garante previous.end == current.start e durações iguais.
pub struct PeriodResolver;

impl PeriodResolver {
    /// `now` é capturado UMA vez pelo chamador e reaproveitado na requisição toda.
    pub fn resolve(selector: &PeriodSelector, now: DateTime<Utc>) -> Result<ResolvedPeriod, AppError> {
        let current = match selector {
            PeriodSelector::Named(token) => {
                let token: PeriodToken = token.parse()?;
                let start = token
                    .start_from(now)
                    .ok_or_else(|| AppError::invalid_period("Período fora do intervalo suportado."))?;
                DateRange { start, end: now }
            }
            PeriodSelector::Explicit { start, end } => {
                if start >= end {
                    return Err(AppError::invalid_period(
                        "O início do período deve ser anterior ao fim.",
                    ));
                }
                DateRange { start: *start, end: *end }
            }
        };

        let previous_start = current
            .start
            .checked_sub_signed(current.duration())
            .ok_or_else(|| AppError::invalid_period("Período anterior fora do intervalo suportado."))?;

        Ok(ResolvedPeriod {
            current,
            previous: DateRange { start: previous_start, end: current.start },
        })
    }
}
