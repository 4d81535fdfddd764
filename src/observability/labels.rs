use metrics::{IntoLabels, Label, SharedString};

/// Holder of multiple [Label], e.g. the source site a batch of records was scraped from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labels(Vec<Label>);

impl Labels {
    pub fn empty() -> Self {
        Labels(vec![])
    }

    pub fn new(
        labels: &[(
            impl Into<SharedString> + Clone,
            impl Into<SharedString> + Clone,
        )],
    ) -> Self {
        Labels(labels.iter().map(Label::from).collect())
    }

    /// Shorthand for labels carrying only the record source
    pub fn for_source(source: &str) -> Self {
        Labels::new(&[(SOURCE, source.to_string())])
    }

    /// Clone the actual [Labels] with additional key-value labels
    pub fn clone_with_labels(
        &self,
        additional_labels: &[(
            impl Into<SharedString> + Clone,
            impl Into<SharedString> + Clone,
        )],
    ) -> Labels {
        let mut tags = self.0.clone();
        tags.extend(additional_labels.iter().map(Label::from));
        Labels(tags)
    }
}

pub const SOURCE: &str = "source";

impl IntoLabels for Labels {
    fn into_labels(self) -> Vec<Label> {
        self.0
    }
}

#[cfg(test)]
mod test {
    use crate::observability::labels::Labels;
    use metrics::{IntoLabels, Label};

    #[test]
    fn test_clone_labels() {
        let labels = Labels::for_source("axesor");

        let labels_2 = labels.clone_with_labels(&[("field", "email")]);
        let label_list = labels_2.into_labels();
        assert!(label_list.contains(&Label::new("source", "axesor")));
        assert!(label_list.contains(&Label::new("field", "email")));

        let labels_3 = labels.clone_with_labels(&[("field", "phone"), ("result", "found")]);
        let label_list = labels_3.into_labels();
        assert!(label_list.contains(&Label::new("source", "axesor")));
        assert!(!label_list.contains(&Label::new("field", "email")));
        assert!(label_list.contains(&Label::new("field", "phone")));
        assert!(label_list.contains(&Label::new("result", "found")));
    }

    #[test]
    fn empty_labels_have_no_entries() {
        assert!(Labels::empty().into_labels().is_empty());
        assert_eq!(Labels::default(), Labels::empty());
    }
}
