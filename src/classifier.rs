//! Mapping of sentence scores to a sentiment and an emotion label.

use serde::{Deserialize, Serialize};

/// Sign of the positivity percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

/// Emotion layered on top of a positive or negative sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Surprised,
    Afraid,
    Angry,
    Sad,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Surprised => "surprised",
            Emotion::Afraid => "afraid",
            Emotion::Angry => "angry",
            Emotion::Sad => "sad",
        }
    }
}

/// Threshold above which a negative sentence reads as angry rather than afraid
pub const ANGER_THRESHOLD: f64 = 0.5;

/// Outcome of [`classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub sentiment: Sentiment,
    /// `None` for neutral sentences and when the emotion number is zero
    pub emotion: Option<Emotion>,
}

impl Classification {
    /// The most specific label: the emotion if there is one, else the sentiment
    pub fn label(&self) -> &'static str {
        match self.emotion {
            Some(emotion) => emotion.as_str(),
            None => self.sentiment.as_str(),
        }
    }
}

/// Classify a sentence from its positivity percent and emotion number.
///
/// | positivity | emotion number  | emotion   |
/// |------------|-----------------|-----------|
/// | > 0        | > 0             | surprised |
/// | > 0        | < 0             | afraid    |
/// | < 0        | > 0.5           | angry     |
/// | < 0        | in (0, 0.5]     | afraid    |
/// | < 0        | < 0             | sad       |
/// | ≠ 0        | = 0             | none      |
/// | = 0        | any             | none (neutral sentence) |
///
/// Total over all inputs: a NaN positivity is neutral and a NaN emotion
/// number carries no emotion.
pub fn classify(positivity_percent: f64, emotion_number: f64) -> Classification {
    if positivity_percent > 0.0 {
        let emotion = if emotion_number > 0.0 {
            Some(Emotion::Surprised)
        } else if emotion_number < 0.0 {
            Some(Emotion::Afraid)
        } else {
            None
        };
        Classification {
            sentiment: Sentiment::Positive,
            emotion,
        }
    } else if positivity_percent < 0.0 {
        let emotion = if emotion_number > ANGER_THRESHOLD {
            Some(Emotion::Angry)
        } else if emotion_number > 0.0 {
            Some(Emotion::Afraid)
        } else if emotion_number < 0.0 {
            Some(Emotion::Sad)
        } else {
            None
        };
        Classification {
            sentiment: Sentiment::Negative,
            emotion,
        }
    } else {
        Classification {
            sentiment: Sentiment::Neutral,
            emotion: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_branches() {
        assert_eq!(classify(25.0, 1.0).emotion, Some(Emotion::Surprised));
        assert_eq!(classify(25.0, -2.0).emotion, Some(Emotion::Afraid));

        let c = classify(25.0, 0.0);
        assert_eq!(c.sentiment, Sentiment::Positive);
        assert_eq!(c.emotion, None);
        assert_eq!(c.label(), "positive");
    }

    #[test]
    fn test_negative_branches() {
        assert_eq!(classify(-5.0, 3.0).emotion, Some(Emotion::Angry));
        assert_eq!(classify(-5.0, 0.25).emotion, Some(Emotion::Afraid));
        assert_eq!(classify(-5.0, -1.0).emotion, Some(Emotion::Sad));

        let c = classify(-5.0, 0.0);
        assert_eq!(c.sentiment, Sentiment::Negative);
        assert_eq!(c.emotion, None);
        assert_eq!(c.label(), "negative");
    }

    #[test]
    fn test_anger_boundary() {
        assert_eq!(classify(-5.0, 0.5).emotion, Some(Emotion::Afraid));
        assert_eq!(
            classify(-5.0, 0.5 + f64::EPSILON).emotion,
            Some(Emotion::Angry)
        );
        assert_eq!(
            classify(-5.0, 0.5 - f64::EPSILON).emotion,
            Some(Emotion::Afraid)
        );
    }

    #[test]
    fn test_neutral_ignores_emotion_number() {
        for emotion_number in [-3.0, 0.0, 0.75, 10.0] {
            let c = classify(0.0, emotion_number);
            assert_eq!(c.sentiment, Sentiment::Neutral);
            assert_eq!(c.label(), "neutral");
        }
    }

    #[test]
    fn test_nan_inputs() {
        assert_eq!(classify(f64::NAN, 1.0).sentiment, Sentiment::Neutral);
        let c = classify(-1.0, f64::NAN);
        assert_eq!(c.sentiment, Sentiment::Negative);
        assert_eq!(c.emotion, None);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&classify(10.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"sentiment":"positive","emotion":"surprised"}"#);
    }
}
