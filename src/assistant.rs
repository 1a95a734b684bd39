//! Shopping assistant
//!
//! Canned replies chosen by keyword. [`reply`] is a pure function of the
//! shopper's message and a [`CartSummary`]; it never touches the store.

use smallvec::SmallVec;

use crate::store::CartSummary;

/// An assistant reply with follow-up prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply text
    pub text: String,

    /// Suggested follow-up questions
    pub suggestions: SmallVec<[&'static str; 4]>,
}

impl Reply {
    fn new(text: impl Into<String>, suggestions: &[&'static str]) -> Self {
        Reply {
            text: text.into(),
            suggestions: suggestions.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Topic {
    Camera,
    Battery,
    Gaming,
    Comparison,
    Cart,
    Payment,
    Exit,
}

const TOPICS: [(&[&str], Topic); 7] = [
    (&["photo", "camera"], Topic::Camera),
    (&["battery"], Topic::Battery),
    (&["gaming", "game"], Topic::Gaming),
    (&["compare", "iphone"], Topic::Comparison),
    (&["cart", "total"], Topic::Cart),
    (&["pay", "checkout"], Topic::Payment),
    (&["exit", "leave"], Topic::Exit),
];

/// The opening message.
pub fn greeting() -> Reply {
    Reply::new(
        "Hi! I'm your shopping assistant. Ask me about products, comparisons, or your cart.",
        &[
            "Is this good for photography?",
            "Compare with iPhone 15",
            "How long does the battery last?",
            "What's in my cart?",
        ],
    )
}

/// Reply to a shopper's message.
///
/// A keyword matches any word it prefixes ("photo" matches "photography"),
/// ignoring case. The first matching topic wins. Returns `None` for blank input.
pub fn reply(input: &str, cart: &CartSummary) -> Option<Reply> {
    let message = input.to_lowercase();
    let words: SmallVec<[&str; 16]> = message
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    if words.is_empty() {
        return None;
    }

    let topic = TOPICS
        .iter()
        .find(|(keywords, _)| {
            keywords
                .iter()
                .any(|keyword| words.iter().any(|word| word.starts_with(keyword)))
        })
        .map(|(_, topic)| *topic);

    Some(match topic {
        Some(topic) => topic_reply(topic, cart),
        None => Reply::new(
            "Happy to help! This phone offers flagship features at a competitive price, with \
             strong camera quality, battery life and performance. What would you like to know?",
            &[
                "Tell me about the display",
                "How's the build quality?",
                "Compare with similar phones",
                "What's in my cart?",
            ],
        ),
    })
}

fn topic_reply(topic: Topic, cart: &CartSummary) -> Reply {
    match topic {
        Topic::Camera => Reply::new(
            "The triple camera system is the highlight: a 48MP main sensor, night mode and 4K \
             video. Most reviewers rate the camera as excellent.",
            &[
                "What about low-light performance?",
                "Compare camera with Galaxy S24",
            ],
        ),
        Topic::Battery => Reply::new(
            "Expect a full day of typical use. The 4,000mAh battery fast charges to 80% in about \
             45 minutes and supports wireless charging.",
            &["How fast does it charge?", "Battery vs competitors"],
        ),
        Topic::Gaming => Reply::new(
            "It handles current games at max settings on a smooth 120Hz display without \
             throttling.",
            &["What games run best?", "Compare gaming performance"],
        ),
        Topic::Comparison => Reply::new(
            "Against the iPhone 15 it offers similar performance for $300 less, a larger 6.7\" \
             screen and longer battery life. The iPhone integrates better with its ecosystem.",
            &["Show detailed comparison", "Which has better resale value?"],
        ),
        Topic::Cart => cart_reply(cart),
        Topic::Payment => payment_reply(cart),
        Topic::Exit => exit_reply(cart),
    }
}

fn cart_reply(cart: &CartSummary) -> Reply {
    if cart.lines == 0 {
        return Reply::new(
            "Your cart is empty. Scan a barcode to add an item.",
            &["What can I scan?"],
        );
    }

    Reply::new(
        format!(
            "You have {} item(s) in your cart worth {}, of which {} is still unpaid.",
            cart.lines, cart.total, cart.unpaid_total
        ),
        &["How do I pay?", "Can I leave now?"],
    )
}

fn payment_reply(cart: &CartSummary) -> Reply {
    if cart.unpaid_lines == 0 {
        return Reply::new("There is nothing left to pay for.", &["Can I leave now?"]);
    }

    Reply::new(
        format!(
            "You owe {} for {} unpaid item(s). Use `pay` to settle them.",
            cart.unpaid_total, cart.unpaid_lines
        ),
        &["What's in my cart?"],
    )
}

fn exit_reply(cart: &CartSummary) -> Reply {
    if cart.can_exit {
        return Reply::new("Everything is paid for, so you can walk out.", &[]);
    }

    Reply::new(
        format!(
            "Not yet: {} item(s) still need paying for before the gate will open.",
            cart.unpaid_lines
        ),
        &["How do I pay?"],
    )
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use super::*;

    fn summary(lines: usize, unpaid_lines: usize, total: i64, unpaid_total: i64) -> CartSummary {
        CartSummary {
            lines,
            paid_lines: lines - unpaid_lines,
            unpaid_lines,
            total: Money::from_minor(total, USD),
            unpaid_total: Money::from_minor(unpaid_total, USD),
            can_exit: unpaid_lines == 0,
        }
    }

    #[test]
    fn blank_input_gets_no_reply() {
        assert_eq!(reply("   ", &summary(0, 0, 0, 0)), None);
    }

    #[test]
    fn keywords_match_case_insensitively() -> TestResult {
        let camera = reply("Is this good for PHOTOGRAPHY?", &summary(0, 0, 0, 0)).ok_or("no reply")?;

        assert!(camera.text.contains("camera"));
        assert!(!camera.suggestions.is_empty());

        Ok(())
    }

    #[test]
    fn first_matching_topic_wins() -> TestResult {
        let reply = reply("compare the camera", &summary(0, 0, 0, 0)).ok_or("no reply")?;

        assert!(reply.text.contains("48MP"), "{}", reply.text);

        Ok(())
    }

    #[test]
    fn keywords_match_word_prefixes_only() -> TestResult {
        let reply = reply("Tell me about the display", &summary(1, 1, 349, 349)).ok_or("no reply")?;

        assert!(reply.text.starts_with("Happy to help"), "{}", reply.text);

        Ok(())
    }

    #[test]
    fn unknown_input_falls_back() -> TestResult {
        let reply = reply("hello", &summary(0, 0, 0, 0)).ok_or("no reply")?;

        assert!(reply.text.starts_with("Happy to help"));
        assert_eq!(reply.suggestions.len(), 4);

        Ok(())
    }

    #[test]
    fn cart_reply_uses_summary() -> TestResult {
        let reply = reply("what's my total?", &summary(2, 1, 1197, 499)).ok_or("no reply")?;

        assert!(reply.text.contains("$11.97"), "{}", reply.text);
        assert!(reply.text.contains("$4.99"), "{}", reply.text);

        Ok(())
    }

    #[test]
    fn payment_and_exit_replies_follow_cart_state() -> TestResult {
        let owing = summary(1, 1, 349, 349);
        let settled = summary(1, 0, 349, 0);

        let pay = reply("how do I pay", &owing).ok_or("no reply")?;
        let exit = reply("can I leave?", &owing).ok_or("no reply")?;

        assert!(pay.text.contains("$3.49"), "{}", pay.text);
        assert!(exit.text.starts_with("Not yet"), "{}", exit.text);

        let exit = reply("can I leave?", &settled).ok_or("no reply")?;

        assert!(exit.text.contains("walk out"), "{}", exit.text);

        Ok(())
    }

    #[test]
    fn greeting_offers_suggestions() {
        assert_eq!(greeting().suggestions.len(), 4);
    }
}
