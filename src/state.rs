use crate::model::InferenceError;
use crate::predictor::{Prediction, Predictor};

pub const TITLE: &str = "UVU Data Science Club Sentiment Classifier";
pub const SUBHEADER: &str = "Built By Drew Ipson";
pub const INTRO: &str = "This application predicts whether or not a block of text is positive or negative by using \
a Multinominal Naive Bayes model trained off of 25,000 movie reviews obtained from \
Kaggle.com. Please enter the text you want analyzed and the model will predict whether or \
not the text is potivie or negative.";
pub const INPUT_LABEL: &str = "Enter text here:";
pub const PREDICT_LABEL: &str = "Predict Sentiment";
pub const SEE_SCORE_LABEL: &str = "See sentiment score.";
pub const POSITIVE_BANNER: &str = "This is a positive review!";
pub const NEGATIVE_BANNER: &str = "This is probably not a good movie to see...";

pub const DEFAULT_REVIEW: &str = "I went to see Shang Chi and the legend of the ten rings by marvel studios in theaters, and \
this movie has blown me away meaning it was incredible. It has been my dream to see my \
very first MCU movie in theaters. I’m not going to lie, but this movie truly brought me to \
see it since I feel a real inspiration for martial arts. But as soon as I saw the movie, \
the human acting was so strong, incredible, and speechless. This had one of the most \
definable and meaningful origins in the movie which is dark and emotional. Marvel decided \
to come up with another flavor that has never existed before. First MCU started with \
nordic culture with thor, African culture for black panther, and they finally come up with \
a stunning martial arts/Asian culture that is so satisfying. The mandarin (Tony Leung \
Chiu-wai) was an incredible character in the movie. It made me feel that I want to see \
this movie again, he’s my favorite character in the movie. Awkwafina was the funniest \
actor and there isn’t a problem with it since MCU needs humor. Lastly, Simu Liu as Shang \
chi’s dream of becoming a superhero became true and he did very excellently. This movie \
has various easter eggs you must know, some of them are teasers while some of them are \
returning MCU characters. This movie isn’t only a must-watch, but a movie to give a \
tribute to martial arts culture for those who are true fans of it. I would give this a \
9.6/10 perfect score. Don’t forget, there are post-credits!";

// ---------------------------------------------------------------------------
// Events and state
// ---------------------------------------------------------------------------

/// A single user interaction. Each one re-derives the whole page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    TextEdited(String),
    PredictPressed,
    SeeScoreToggled(bool),
}

/// The full page state, independent of rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub text: String,
    pub see_score: bool,
    /// Only set by the render that follows a predict press.
    pub result: Option<Prediction>,
    /// Inference failure reported by the app for the current render.
    pub failure: Option<String>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            text: DEFAULT_REVIEW.to_string(),
            see_score: false,
            result: None,
            failure: None,
        }
    }
}

impl PageState {
    /// Apply one interaction. Any event other than a predict press drops the
    /// previous result; a press with empty text never reaches the predictor.
    pub fn apply(&mut self, event: PageEvent, predictor: &Predictor) -> Result<(), InferenceError> {
        self.result = None;
        self.failure = None;
        match event {
            PageEvent::TextEdited(text) => self.text = text,
            PageEvent::SeeScoreToggled(checked) => self.see_score = checked,
            PageEvent::PredictPressed => {
                if !self.text.is_empty() {
                    self.result = Some(predictor.classify(&self.text)?);
                }
            }
        }
        Ok(())
    }

    pub fn record_failure(&mut self, err: &InferenceError) {
        self.failure = Some(format!("Prediction failed: {err}"));
    }
}

// ---------------------------------------------------------------------------
// View – pure function of the state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Title(&'static str),
    Subheader(&'static str),
    Paragraph(&'static str),
    TextArea { label: &'static str, value: String },
    Button(&'static str),
    Checkbox { label: &'static str, checked: bool },
    Success(&'static str),
    Error(&'static str),
    /// 0..=100
    Progress(u8),
    Info(String),
    Failure(String),
}

/// Derive the page, top to bottom, from the current state.
pub fn view(state: &PageState) -> Vec<Widget> {
    let mut widgets = vec![
        Widget::Title(TITLE),
        Widget::Subheader(SUBHEADER),
        Widget::Paragraph(INTRO),
        Widget::TextArea {
            label: INPUT_LABEL,
            value: state.text.clone(),
        },
        Widget::Button(PREDICT_LABEL),
    ];

    if let Some(msg) = &state.failure {
        widgets.push(Widget::Failure(msg.clone()));
    }

    if let Some(result) = &state.result {
        widgets.push(if result.positive {
            Widget::Success(POSITIVE_BANNER)
        } else {
            Widget::Error(NEGATIVE_BANNER)
        });
    }

    widgets.push(Widget::Checkbox {
        label: SEE_SCORE_LABEL,
        checked: state.see_score,
    });

    if let (true, Some(result)) = (state.see_score, &state.result) {
        widgets.push(Widget::Progress(result.score_percent()));
        widgets.push(Widget::Info(format!(
            "Our sentiment score for this text is {}%.",
            result.percent_label()
        )));
    }

    widgets
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use super::*;
    use crate::predictor::tests::{lexicon_predictor, StubClassifier};

    fn has_result_widgets(widgets: &[Widget]) -> bool {
        widgets.iter().any(|w| {
            matches!(
                w,
                Widget::Success(_) | Widget::Error(_) | Widget::Progress(_) | Widget::Info(_)
            )
        })
    }

    fn stub_predictor(label: i64, p: f64) -> (Predictor, Arc<std::sync::atomic::AtomicUsize>) {
        let stub = StubClassifier::new(label, vec![1.0 - p, p]);
        let calls = Arc::clone(&stub.calls);
        (Predictor::with_classifier(Box::new(stub)).unwrap(), calls)
    }

    #[test]
    fn initial_page_has_default_text_and_no_result() {
        let state = PageState::default();
        let widgets = view(&state);
        assert_eq!(widgets[0], Widget::Title(TITLE));
        assert!(matches!(
            &widgets[3],
            Widget::TextArea { value, .. } if value == DEFAULT_REVIEW
        ));
        assert!(!has_result_widgets(&widgets));
    }

    #[test]
    fn positive_prediction_shows_success_banner() {
        let predictor = lexicon_predictor();
        let mut state = PageState::default();
        state
            .apply(
                PageEvent::TextEdited("I loved this movie, it was fantastic and inspiring".into()),
                &predictor,
            )
            .unwrap();
        state.apply(PageEvent::PredictPressed, &predictor).unwrap();

        let widgets = view(&state);
        assert!(widgets.contains(&Widget::Success(POSITIVE_BANNER)));
        assert!(!widgets.iter().any(|w| matches!(w, Widget::Progress(_))));
    }

    #[test]
    fn negative_prediction_shows_error_banner() {
        let predictor = lexicon_predictor();
        let mut state = PageState {
            text: "This was a terrible, boring waste of time".into(),
            ..PageState::default()
        };
        state.apply(PageEvent::PredictPressed, &predictor).unwrap();
        assert!(view(&state).contains(&Widget::Error(NEGATIVE_BANNER)));
    }

    #[test]
    fn score_widgets_follow_checkbox_and_result() {
        let (predictor, _) = stub_predictor(1, 0.87656);
        let mut state = PageState::default();
        state.apply(PageEvent::SeeScoreToggled(true), &predictor).unwrap();
        state.apply(PageEvent::PredictPressed, &predictor).unwrap();

        let widgets = view(&state);
        let tail = &widgets[widgets.len() - 3..];
        assert_eq!(
            tail,
            &[
                Widget::Checkbox {
                    label: SEE_SCORE_LABEL,
                    checked: true
                },
                Widget::Progress(87),
                Widget::Info("Our sentiment score for this text is 87.66%.".into()),
            ]
        );
        // banner sits between the button and the checkbox
        assert_eq!(widgets[5], Widget::Success(POSITIVE_BANNER));
    }

    #[test]
    fn whole_percent_score_keeps_a_decimal() {
        let (predictor, _) = stub_predictor(0, 0.5);
        let mut state = PageState {
            see_score: true,
            ..PageState::default()
        };
        state.apply(PageEvent::PredictPressed, &predictor).unwrap();

        let widgets = view(&state);
        assert_eq!(
            widgets.last(),
            Some(&Widget::Info(
                "Our sentiment score for this text is 50.0%.".into()
            ))
        );
        assert!(widgets.contains(&Widget::Progress(50)));
    }

    #[test]
    fn default_review_reads_as_positive() {
        let predictor = lexicon_predictor();
        let mut state = PageState::default();
        state.apply(PageEvent::PredictPressed, &predictor).unwrap();
        assert_eq!(view(&state)[1], Widget::Subheader("Built By Drew Ipson"));
        assert!(view(&state).contains(&Widget::Success(POSITIVE_BANNER)));
    }

    #[test]
    fn empty_text_makes_no_prediction() {
        let (predictor, calls) = stub_predictor(1, 0.9);
        let mut state = PageState::default();
        state
            .apply(PageEvent::TextEdited(String::new()), &predictor)
            .unwrap();
        state.apply(PageEvent::PredictPressed, &predictor).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(state.result.is_none());
        assert!(!has_result_widgets(&view(&state)));
    }

    #[test]
    fn checkbox_without_press_shows_nothing() {
        let (predictor, calls) = stub_predictor(1, 0.9);
        let mut state = PageState::default();
        state.apply(PageEvent::SeeScoreToggled(true), &predictor).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!has_result_widgets(&view(&state)));
    }

    #[test]
    fn any_other_event_clears_the_result() {
        let (predictor, calls) = stub_predictor(0, 0.2);
        let mut state = PageState {
            see_score: true,
            ..PageState::default()
        };
        state.apply(PageEvent::PredictPressed, &predictor).unwrap();
        assert!(has_result_widgets(&view(&state)));

        state.apply(PageEvent::SeeScoreToggled(false), &predictor).unwrap();
        assert!(!has_result_widgets(&view(&state)));

        state.apply(PageEvent::PredictPressed, &predictor).unwrap();
        state
            .apply(PageEvent::TextEdited("edited".into()), &predictor)
            .unwrap();
        assert!(!has_result_widgets(&view(&state)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn inference_failure_is_shown_once() {
        let mut stub = StubClassifier::new(1, vec![0.1, 0.9]);
        stub.rows = 0;
        let predictor = Predictor::with_classifier(Box::new(stub)).unwrap();
        let mut state = PageState::default();

        let err = state
            .apply(PageEvent::PredictPressed, &predictor)
            .unwrap_err();
        state.record_failure(&err);
        assert!(view(&state)
            .iter()
            .any(|w| matches!(w, Widget::Failure(msg) if msg.contains("batch of 1"))));
        assert!(state.result.is_none());

        state.apply(PageEvent::SeeScoreToggled(true), &predictor).unwrap();
        assert!(state.failure.is_none());
    }
}
