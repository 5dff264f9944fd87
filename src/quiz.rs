//! Quiz round generation and voice-transcript answer matching.
//!
//! Flow:
//! 1) App fetches the active logo pool for a category.
//! 2) `generate_question` draws one correct item plus three distractors and
//!    shuffles the four displayed names.
//! 3) The UI collects either a tapped option or a speech transcript;
//!    `match_transcript` resolves the transcript to one of the options.
//! 4) The round is scored against the correct item's name and discarded.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::domain::LogoItem;

/// One correct answer plus three distractors.
pub const OPTION_COUNT: usize = 4;

// Tokens shorter than this ("is", "a", "to") carry no signal in noisy
// speech-to-text output and are dropped before the word-overlap rules.
const MIN_TOKEN_CHARS: usize = 3;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QuizError {
  /// The pool cannot supply one correct item plus three distractors.
  #[error("need at least 4 logos to build a question, pool has {0}")]
  PoolTooSmall(usize),
}

/// One quiz round. Created fresh per question, dropped once scored.
#[derive(Clone, Debug)]
pub struct Question {
  pub correct: LogoItem,
  pub options: Vec<String>,
}

/// Build one multiple-choice round from the pool.
///
/// The correct item is drawn uniformly; distractors are drawn uniformly
/// without replacement from the rest, excluded by id rather than by name.
/// Entries that share a display name with the correct item can therefore
/// still appear as distractors; keeping pool names unique is the caller's
/// responsibility.
pub fn generate_question(pool: &[LogoItem]) -> Result<Question, QuizError> {
  if pool.len() < OPTION_COUNT {
    return Err(QuizError::PoolTooSmall(pool.len()));
  }
  let mut rng = rand::thread_rng();

  let correct = pool[rng.gen_range(0..pool.len())].clone();

  let remaining: Vec<&LogoItem> = pool.iter().filter(|it| it.id != correct.id).collect();
  let mut options: Vec<String> = remaining
    .choose_multiple(&mut rng, OPTION_COUNT - 1)
    .map(|it| it.name.clone())
    .collect();
  options.push(correct.name.clone());
  options.shuffle(&mut rng);

  Ok(Question { correct, options })
}

/// Resolve a speech transcript to one of the displayed options.
///
/// Lenient by design: speech-to-text output for airline names is noisy, so
/// the cascade trades precision for recall. Rules run strongest-first, and
/// each rule scans the options in input order before the next rule is tried;
/// rule order is the primary tie-break, option order the secondary one.
pub fn match_transcript<'a>(transcript: &str, options: &'a [String]) -> Option<&'a str> {
  let heard = transcript.trim().to_lowercase();
  if heard.is_empty() {
    // "" is a substring of every option.
    return None;
  }
  let lowered: Vec<String> = options.iter().map(|o| o.trim().to_lowercase()).collect();
  let heard_tokens: HashSet<String> = tokens(&heard).into_iter().collect();

  // 1) The transcript contains the option verbatim.
  if let Some(i) = lowered.iter().position(|o| !o.is_empty() && heard.contains(o.as_str())) {
    return Some(&options[i]);
  }
  // 2) The option contains the transcript verbatim.
  if let Some(i) = lowered.iter().position(|o| o.contains(&heard)) {
    return Some(&options[i]);
  }
  // 3) Some option word appears as a whole word of the transcript.
  if let Some(i) = lowered
    .iter()
    .position(|o| tokens(o).iter().any(|t| heard_tokens.contains(t)))
  {
    return Some(&options[i]);
  }
  // 4) Some transcript word appears inside the option.
  if let Some(i) = lowered
    .iter()
    .position(|o| heard_tokens.iter().any(|t| o.contains(t.as_str())))
  {
    return Some(&options[i]);
  }

  None
}

/// Shuffle a copy of the pool for learn mode. The client walks the deck
/// cyclically; a fresh shuffle per fetch randomizes each session.
pub fn shuffled_deck(pool: &[LogoItem]) -> Vec<LogoItem> {
  let mut deck = pool.to_vec();
  deck.shuffle(&mut rand::thread_rng());
  deck
}

fn tokens(s: &str) -> Vec<String> {
  s.split_whitespace()
    .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
    .map(|t| t.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::LogoSource;
  use std::collections::HashMap;

  fn item(id: &str, name: &str) -> LogoItem {
    LogoItem {
      id: id.into(),
      name: name.into(),
      image_url: format!("https://upload.example.org/{id}.png"),
      category: "airline".into(),
      source: LogoSource::Seed,
      is_active: true,
      updated_at: "2025-06-01T00:00:00Z".into(),
    }
  }

  fn airline_pool() -> Vec<LogoItem> {
    vec![
      item("a1", "Emirates"),
      item("a2", "Qatar Airways"),
      item("a3", "Delta"),
      item("a4", "JAL"),
      item("a5", "Lufthansa"),
      item("a6", "Ryanair"),
    ]
  }

  fn options() -> Vec<String> {
    ["Emirates", "Qatar Airways", "Delta", "JAL"]
      .iter()
      .map(|s| s.to_string())
      .collect()
  }

  #[test]
  fn question_has_four_distinct_options_including_the_answer() {
    for _ in 0..200 {
      let q = generate_question(&airline_pool()).expect("question");
      assert_eq!(q.options.len(), OPTION_COUNT);
      let unique: HashSet<&str> = q.options.iter().map(|s| s.as_str()).collect();
      assert_eq!(unique.len(), OPTION_COUNT);
      assert!(q.options.contains(&q.correct.name));
    }
  }

  #[test]
  fn pool_below_four_is_rejected() {
    let pool = airline_pool()[..3].to_vec();
    assert!(matches!(
      generate_question(&pool),
      Err(QuizError::PoolTooSmall(3))
    ));
  }

  #[test]
  fn correct_item_selection_is_roughly_uniform() {
    let pool = airline_pool();
    let trials = 6000;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..trials {
      let q = generate_question(&pool).expect("question");
      *counts.entry(q.correct.id).or_default() += 1;
    }
    for it in &pool {
      let n = counts.get(&it.id).copied().unwrap_or(0);
      assert!(n > 700 && n < 1300, "item {} picked {} times", it.name, n);
    }
  }

  #[test]
  fn duplicate_names_are_not_deduped() {
    // Two distinct ids sharing a display name: exclusion is by id only, so
    // both can land in the same round.
    let pool = vec![
      item("a1", "Emirates"),
      item("a2", "Emirates"),
      item("a3", "Delta"),
      item("a4", "JAL"),
    ];
    let q = generate_question(&pool).expect("question");
    let doubles = q.options.iter().filter(|o| o.as_str() == "Emirates").count();
    assert_eq!(doubles, 2);
  }

  #[test]
  fn exact_name_transcript_matches() {
    assert_eq!(match_transcript("emirates", &options()), Some("Emirates"));
  }

  #[test]
  fn option_inside_longer_transcript_matches() {
    assert_eq!(
      match_transcript("its qatar airways i think", &options()),
      Some("Qatar Airways")
    );
  }

  #[test]
  fn nonsense_transcript_matches_nothing() {
    assert_eq!(match_transcript("xyz nonsense", &options()), None);
  }

  #[test]
  fn partial_name_resolves_to_the_option_containing_it() {
    // "jal" is a substring of "jal express" but not of "japan airlines", so
    // rule 2 settles the tie in favor of "JAL Express".
    let opts: Vec<String> = ["Japan Airlines", "JAL Express", "Delta", "Emirates"]
      .iter()
      .map(|s| s.to_string())
      .collect();
    assert_eq!(match_transcript("jal", &opts), Some("JAL Express"));
  }

  #[test]
  fn substring_rules_win_over_word_overlap() {
    // "American Airlines" shares the token "airlines" with the transcript,
    // but rule 1 already resolves "delta" before the token rules run.
    let opts: Vec<String> = ["American Airlines", "Delta"]
      .iter()
      .map(|s| s.to_string())
      .collect();
    assert_eq!(match_transcript("delta airlines", &opts), Some("Delta"));
  }

  #[test]
  fn first_option_wins_within_a_rule() {
    let opts: Vec<String> = ["Air France", "Air China"].iter().map(|s| s.to_string()).collect();
    assert_eq!(match_transcript("air", &opts), Some("Air France"));
  }

  #[test]
  fn shared_long_word_matches_via_token_overlap() {
    let opts: Vec<String> = ["Delta", "Lufthansa Cargo"].iter().map(|s| s.to_string()).collect();
    assert_eq!(
      match_transcript("maybe lufthansa airline", &opts),
      Some("Lufthansa Cargo")
    );
  }

  #[test]
  fn transcript_word_inside_option_matches() {
    let opts: Vec<String> = ["Delta", "Finnair"].iter().map(|s| s.to_string()).collect();
    assert_eq!(match_transcript("fin airlines", &opts), Some("Finnair"));
  }

  #[test]
  fn short_tokens_carry_no_signal() {
    assert_eq!(match_transcript("it is al", &options()), None);
  }

  #[test]
  fn blank_transcript_never_matches() {
    assert_eq!(match_transcript("   ", &options()), None);
  }

  #[test]
  fn matching_is_pure() {
    let opts = options();
    let first = match_transcript("emirates", &opts);
    let second = match_transcript("emirates", &opts);
    assert_eq!(first, second);
  }

  #[test]
  fn deck_keeps_every_item() {
    let pool = airline_pool();
    let deck = shuffled_deck(&pool);
    assert_eq!(deck.len(), pool.len());
    let ids: HashSet<&str> = deck.iter().map(|it| it.id.as_str()).collect();
    assert_eq!(ids.len(), pool.len());
  }
}
