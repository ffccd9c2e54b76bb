//! Text rendering of a paycheck estimate.

use widget_core::{EstimateInput, EstimateResult};

use crate::utils::format_won;

/// Header line of every summary.
pub const SUMMARY_TITLE: &str = "[페이체크 계산 결과]";

/// The shareable multi-line summary of one estimate.
///
/// For the default input under the `monthly_simplified` policy (the default
/// `annual_2025` policy reports 소득세 471,250원 for the same salary):
///
/// ```text
/// [페이체크 계산 결과]
/// 급여 기준: 연봉, 퇴직금 별도
/// 입력 금액: 50,000,000원
/// 월 실수령액: 3,586,510원
/// 공제합계: 580,156원
/// 국민연금 188,417원 | 건강보험 142,602원 | 장기요양 18,738원
/// 고용보험 35,700원 | 소득세 177,000원 | 지방소득세 17,700원
/// ```
pub fn render_summary(
    input: &EstimateInput,
    result: &EstimateResult,
) -> String {
    let lines = [
        SUMMARY_TITLE.to_string(),
        format!(
            "급여 기준: {}, {}",
            input.period_basis.label(),
            input.severance.label()
        ),
        format!("입력 금액: {}", format_won(input.gross_amount)),
        format!("월 실수령액: {}", format_won(result.net_monthly)),
        format!("공제합계: {}", format_won(result.total_deduction_monthly)),
        format!(
            "국민연금 {} | 건강보험 {} | 장기요양 {}",
            format_won(result.pension_monthly),
            format_won(result.health_monthly),
            format_won(result.long_term_care_monthly)
        ),
        format!(
            "고용보험 {} | 소득세 {} | 지방소득세 {}",
            format_won(result.employment_monthly),
            format_won(result.income_tax_monthly),
            format_won(result.local_income_tax_monthly)
        ),
    ];

    lines.join("\n")
}

/// Annual take-home line shown under the summary on request.
pub fn render_annual_net(result: &EstimateResult) -> String {
    format!("연 실수령액: {}", format_won(result.net_annual()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use widget_core::{PeriodBasis, SeveranceHandling, presets};

    use super::*;

    #[test]
    fn summary_for_default_input_under_monthly_policy() {
        let input = EstimateInput::default();
        let result = presets::monthly_simplified()
            .estimator()
            .estimate(&input);

        let expected = "\
[페이체크 계산 결과]
급여 기준: 연봉, 퇴직금 별도
입력 금액: 50,000,000원
월 실수령액: 3,586,510원
공제합계: 580,156원
국민연금 188,417원 | 건강보험 142,602원 | 장기요양 18,738원
고용보험 35,700원 | 소득세 177,000원 | 지방소득세 17,700원";

        assert_eq!(render_summary(&input, &result), expected);
    }

    #[test]
    fn summary_labels_follow_basis_and_severance() {
        let input = EstimateInput {
            gross_amount: dec!(3000000),
            period_basis: PeriodBasis::Monthly,
            severance: SeveranceHandling::IncludedInAnnual,
            ..EstimateInput::default()
        };
        let result = EstimateResult::default();

        let summary = render_summary(&input, &result);
        let lines: Vec<_> = summary.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], "급여 기준: 월급, 퇴직금 포함");
        assert_eq!(lines[2], "입력 금액: 3,000,000원");
        assert_eq!(lines[3], "월 실수령액: 0원");
    }

    #[test]
    fn annual_net_is_twelve_months() {
        let result = EstimateResult {
            net_monthly: dec!(3586510),
            ..EstimateResult::default()
        };

        assert_eq!(render_annual_net(&result), "연 실수령액: 43,038,120원");
    }
}
