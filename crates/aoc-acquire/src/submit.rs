use aoc_model::{Level, PuzzleIdentity, Submission, SubmissionOutcome};
use scraper::{Html, Selector};

use crate::{Error, Result, Transport};

/// Post an answer and classify the page the site answers with.
///
/// `level` is checked before anything is sent.
pub async fn submit<T>(
    transport: &T,
    puzzle: &PuzzleIdentity,
    answer: &str,
    level: i64,
) -> Result<Submission>
where
    T: Transport + Sync + ?Sized,
{
    let level = Level::try_from(level)?;
    let url = puzzle.answer_url();
    let level_field = level.to_string();

    tracing::info!(puzzle = %puzzle, level = %level, answer = %answer, "Submitting answer");
    let response = transport
        .post_form(&url, &[("level", level_field.as_str()), ("answer", answer)])
        .await?;

    if !response.is_success() {
        tracing::error!(status = response.status, url = %url, "Answer submission rejected");
        tracing::error!("{}", response.body);
        return Err(Error::Submit {
            status: response.status,
            body: response.body,
        });
    }

    let outcome = classify(&response.body);
    tracing::debug!(?outcome, "Classified submission response");

    Ok(Submission {
        puzzle: puzzle.clone(),
        level,
        answer: answer.to_string(),
        outcome,
        redirect_url: response.url,
    })
}

/// Classify a submission response page.
///
/// Looks at the text of the first `<article>` and checks the known phrases in
/// order; the first one found decides.
pub fn classify(html: &str) -> SubmissionOutcome {
    let Some(message) = article_text(html) else {
        return SubmissionOutcome::Unparseable {
            raw: html.to_string(),
        };
    };

    if message.contains("Thats the right answer!") {
        SubmissionOutcome::Correct
    } else if message.contains("Did you already complete it") {
        SubmissionOutcome::AlreadySubmitted { message }
    } else if message.contains("That's not the right answer") {
        SubmissionOutcome::Incorrect { message }
    } else if message.contains("You gave an answer too recently") {
        SubmissionOutcome::RateLimited { message }
    } else {
        SubmissionOutcome::Unparseable {
            raw: html.to_string(),
        }
    }
}

/// Text content of the first `<article>` element, if any.
fn article_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("article").expect("valid selector");
    document
        .select(&selector)
        .next()
        .map(|article| article.text().collect())
}
