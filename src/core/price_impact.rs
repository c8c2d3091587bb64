use std::io::{self, BufRead, Write};

/// Price impact (in %) at which the user has to confirm the swap
pub const ALLOWED_PRICE_IMPACT_HIGH: f64 = 5.0;

/// Price impact (in %) at which the user has to type [CONFIRM_PHRASE]
pub const PRICE_IMPACT_WITHOUT_FEE_CONFIRM_MIN: f64 = 10.0;

pub const ALLOWED_PRICE_IMPACT_LOW: f64 = 1.0;
pub const ALLOWED_PRICE_IMPACT_MEDIUM: f64 = 3.0;

/// Swaps above this are not allowed at all
pub const BLOCKED_PRICE_IMPACT_NON_EXPERT: f64 = 15.0;

pub const CONFIRM_PHRASE: &str = "confirm";

/// Blocking user prompts
pub trait Prompt {
   /// Ask for text, `None` if the user dismissed the prompt
   fn prompt(&mut self, message: &str) -> Option<String>;

   /// Ask a yes/no question
   fn confirm(&mut self, message: &str) -> bool;
}

/// Given the price impact of a trade without the fee, get user confirmation
///
/// Returns true if the swap may proceed.
pub fn confirm_price_impact(price_impact: f64, prompt: &mut impl Prompt) -> bool {
   if price_impact >= PRICE_IMPACT_WITHOUT_FEE_CONFIRM_MIN {
      let msg = format!(
         "This swap has a price impact of at least {:.0}%. Please type the word \"{}\" to continue with this swap.",
         PRICE_IMPACT_WITHOUT_FEE_CONFIRM_MIN, CONFIRM_PHRASE
      );
      return prompt.prompt(&msg).as_deref() == Some(CONFIRM_PHRASE);
   }

   if price_impact >= ALLOWED_PRICE_IMPACT_HIGH {
      let msg = format!(
         "This swap has a price impact of at least {:.0}%. Please confirm that you would like to continue with this swap.",
         ALLOWED_PRICE_IMPACT_HIGH
      );
      return prompt.confirm(&msg);
   }

   true
}

/// Price impact in % given the output at the current price and the actual output
pub fn price_impact(ideal_amount_out: f64, amount_out: f64) -> f64 {
   if ideal_amount_out <= 0.0 {
      return 0.0;
   }
   (1.0 - (amount_out / ideal_amount_out)) * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriceImpactSeverity {
   Low,
   Medium,
   High,
   Severe,
   Blocked,
}

impl PriceImpactSeverity {
   pub fn from_percent(price_impact: f64) -> Self {
      if price_impact < ALLOWED_PRICE_IMPACT_LOW {
         Self::Low
      } else if price_impact < ALLOWED_PRICE_IMPACT_MEDIUM {
         Self::Medium
      } else if price_impact < ALLOWED_PRICE_IMPACT_HIGH {
         Self::High
      } else if price_impact < BLOCKED_PRICE_IMPACT_NON_EXPERT {
         Self::Severe
      } else {
         Self::Blocked
      }
   }
}

/// [Prompt] on stdin/stdout
pub struct TerminalPrompt<R, W> {
   input: R,
   output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
   pub fn stdio() -> Self {
      Self {
         input: io::stdin().lock(),
         output: io::stdout(),
      }
   }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
   pub fn new(input: R, output: W) -> Self {
      Self { input, output }
   }

   fn read_line(&mut self, message: &str) -> Option<String> {
      writeln!(self.output, "{}", message).ok()?;
      self.output.flush().ok()?;

      let mut line = String::new();
      match self.input.read_line(&mut line) {
         Ok(0) | Err(_) => None,
         Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
      }
   }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
   fn prompt(&mut self, message: &str) -> Option<String> {
      self.read_line(message)
   }

   fn confirm(&mut self, message: &str) -> bool {
      let message = format!("{} [y/N]", message);
      matches!(
         self.read_line(&message).as_deref().map(str::trim),
         Some("y") | Some("Y") | Some("yes")
      )
   }
}
