use ::std::{collections::BTreeMap, fmt};
use compact_str::CompactString;
use langfreq::{Detector, Sample};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LanguageScore {
    pub total: usize,
    pub correct: usize,
}

impl LanguageScore {
    #[inline]
    fn merge(&mut self, other: Self) {
        self.total += other.total;
        self.correct += other.correct;
    }

    /// Fraction of correct detections, `0.0` for no samples
    #[inline]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Detection results of a labeled test set
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Evaluation {
    pub overall: LanguageScore,
    /// Samples no language was detected for
    pub undetectable: usize,
    /// By expected label
    pub languages: BTreeMap<CompactString, LanguageScore>,
}

impl Evaluation {
    fn add(mut self, sample: &Sample, detected: Option<&str>) -> Self {
        let score = LanguageScore {
            total: 1,
            correct: usize::from(detected == Some(sample.label.as_str())),
        };
        self.overall.merge(score);
        if detected.is_none() {
            self.undetectable += 1;
        }
        self.languages
            .entry(sample.label.clone())
            .or_default()
            .merge(score);
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.overall.merge(other.overall);
        self.undetectable += other.undetectable;
        for (language, score) in other.languages {
            self.languages.entry(language).or_default().merge(score);
        }
        self
    }

    #[inline]
    pub fn accuracy(&self) -> f64 {
        self.overall.accuracy()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (language, score) in self.languages.iter() {
            writeln!(
                f,
                "{language}: {:.2}% ({}/{})",
                score.accuracy() * 100.0,
                score.correct,
                score.total
            )?;
        }
        write!(
            f,
            "Accuracy: {:.2}% ({}/{}, {} undetectable)",
            self.accuracy() * 100.0,
            self.overall.correct,
            self.overall.total,
            self.undetectable
        )
    }
}

/// Detects every sample in parallel and compares with its label
pub fn evaluate(detector: &Detector<'_>, samples: &[Sample]) -> Evaluation {
    samples
        .par_iter()
        .fold(Evaluation::default, |evaluation, sample| {
            let detected = detector.detect(&sample.text).ok();
            evaluation.add(sample, detected.as_deref())
        })
        .reduce(Evaluation::default, Evaluation::merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use langfreq::{DetectorBuilder, ModelBuilder, ModelConfig, ModelsStorage};

    fn train() -> Vec<Sample> {
        vec![
            Sample::new("en", "the cat sat on the mat"),
            Sample::new("en", "the dog is in the house"),
            Sample::new("fr", "le chat est sur le tapis"),
            Sample::new("fr", "le chien est dans la maison"),
            Sample::new("ru", "кошка сидит на коврике"),
        ]
    }

    #[test]
    fn test_evaluate() {
        let model_builder = ModelBuilder::new(ModelConfig::new().frequency_threshold(0.0));
        let storage = ModelsStorage::new(model_builder.build_profiles(&train()));
        let detector = DetectorBuilder::new(&storage).build();

        let test = [
            Sample::new("en", "the cat"),
            Sample::new("fr", "le chien"),
            Sample::new("ru", "кошка"),
            // wrong on purpose
            Sample::new("en", "le tapis"),
            Sample::new("fr", ""),
        ];
        let evaluation = evaluate(&detector, &test);

        assert_eq!(evaluation.overall, LanguageScore { total: 5, correct: 3 });
        assert_eq!(evaluation.undetectable, 1);
        assert!(approx_eq!(f64, evaluation.accuracy(), 0.6));
        assert_eq!(evaluation.languages["en"], LanguageScore { total: 2, correct: 1 });
        assert_eq!(evaluation.languages["fr"], LanguageScore { total: 2, correct: 1 });
        assert_eq!(evaluation.languages["ru"], LanguageScore { total: 1, correct: 1 });

        let report = evaluation.to_string();
        assert!(report.ends_with("Accuracy: 60.00% (3/5, 1 undetectable)"), "{report}");
    }

    #[test]
    fn test_empty() {
        let storage = ModelsStorage::default();
        let detector = DetectorBuilder::new(&storage).build();
        let evaluation = evaluate(&detector, &[]);
        assert_eq!(evaluation, Evaluation::default());
        assert_eq!(evaluation.accuracy(), 0.0);
    }
}
