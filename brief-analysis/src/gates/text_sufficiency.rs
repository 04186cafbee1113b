//! Text sufficiency gate.
//!
//! Rejects processing when too little readable text was extracted, so
//! the engine never produces confident-sounding strategy text from
//! unreadable input. Fails fast: no angle generation is attempted.

use brief_core::config::thresholds::Thresholds;
use brief_core::types::report::ReasonCode;

use crate::corpus::Corpus;

/// Measurements taken when the gate passes.
#[derive(Debug, Clone, Copy)]
pub struct TextStats {
    pub document_count: usize,
    pub total_raw_chars: usize,
    pub avg_chars_per_doc: usize,
}

/// Why the gate failed, with a caller-facing banner.
#[derive(Debug, Clone)]
pub struct TextGateFailure {
    pub code: ReasonCode,
    pub banner: String,
}

/// Check the extracted text against the sufficiency thresholds.
///
/// Suspected-scanned takes precedence over plain thinness when several
/// documents are present but each yielded almost nothing — the classic
/// signature of image-only PDFs that skipped OCR.
pub fn check(corpus: &Corpus, thresholds: &Thresholds) -> Result<TextStats, TextGateFailure> {
    if corpus.document_count == 0 {
        return Err(TextGateFailure {
            code: ReasonCode::NoDocs,
            banner: "Insufficient text extracted. No documents were supplied for this case."
                .to_string(),
        });
    }

    let avg = corpus.avg_chars_per_doc();
    if corpus.document_count >= 3 && avg < thresholds.scanned_avg_chars {
        return Err(TextGateFailure {
            code: ReasonCode::SuspectedScanned,
            banner: format!(
                "Insufficient text extracted. {} documents yielded an average of {} characters \
                 each; the bundle looks scanned and may need OCR before analysis.",
                corpus.document_count, avg
            ),
        });
    }

    if corpus.total_raw_chars < thresholds.min_total_chars {
        return Err(TextGateFailure {
            code: ReasonCode::TextThin,
            banner: format!(
                "Insufficient text extracted. Only {} characters of readable text were found \
                 across {} document(s).",
                corpus.total_raw_chars, corpus.document_count
            ),
        });
    }

    Ok(TextStats {
        document_count: corpus.document_count,
        total_raw_chars: corpus.total_raw_chars,
        avg_chars_per_doc: avg,
    })
}
