use std::collections::HashMap;

/// Every element the renderer emits, each with its own class rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Heading(u8),
    Paragraph,
    Link,
    UnorderedList,
    OrderedList,
    ListItem,
    BlockQuote,
    InlineCode,
    CodeBlock,
    Pre,
    TableWrapper,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeader,
    TableCell,
    Rule,
    Strong,
    Emphasis,
}

/// Class lists per element. Overrides win over the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct StyleRules {
    overrides: HashMap<ElementKind, String>,
}

impl StyleRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, kind: ElementKind, classes: impl Into<String>) -> Self {
        self.overrides.insert(kind, classes.into());
        self
    }

    pub fn class_for(&self, kind: ElementKind) -> &str {
        self.overrides
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| default_class(kind))
    }
}

fn default_class(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Heading(1) => "text-3xl font-bold mt-8 mb-4 text-foreground",
        ElementKind::Heading(2) => "text-2xl font-bold mt-6 mb-3 text-foreground",
        ElementKind::Heading(3) => "text-xl font-semibold mt-5 mb-2 text-foreground",
        ElementKind::Heading(4) => "text-lg font-semibold mt-4 mb-2 text-foreground",
        ElementKind::Heading(5) => "text-base font-semibold mt-3 mb-2 text-foreground",
        ElementKind::Heading(_) => "text-sm font-semibold mt-3 mb-2 text-foreground",
        ElementKind::Paragraph => "text-base mb-4",
        ElementKind::Link => {
            "text-primary hover:text-primary/80 underline underline-offset-2 transition-colors"
        }
        ElementKind::UnorderedList => "list-disc list-inside space-y-2 mb-4 ml-4",
        ElementKind::OrderedList => "list-decimal list-inside space-y-2 mb-4 ml-4",
        ElementKind::ListItem => "text-base",
        ElementKind::BlockQuote => {
            "border-l-4 border-primary/30 pl-4 py-2 my-4 italic text-muted-foreground bg-muted/30 rounded-r"
        }
        ElementKind::InlineCode => {
            "bg-muted px-1.5 py-0.5 rounded text-sm font-mono text-foreground border border-border"
        }
        ElementKind::CodeBlock => {
            "block bg-muted p-4 rounded-lg text-sm font-mono overflow-x-auto my-4 border border-border"
        }
        ElementKind::Pre => "overflow-x-auto",
        ElementKind::TableWrapper => "overflow-x-auto my-4",
        ElementKind::Table => "min-w-full divide-y divide-border border border-border rounded-lg",
        ElementKind::TableHead => "bg-muted",
        ElementKind::TableBody => "divide-y divide-border bg-background",
        ElementKind::TableRow => "hover:bg-muted/50 transition-colors",
        ElementKind::TableHeader => "px-4 py-3 text-left text-sm font-semibold text-foreground",
        ElementKind::TableCell => "px-4 py-3 text-sm text-foreground",
        ElementKind::Rule => "my-8 border-border",
        ElementKind::Strong => "font-bold text-foreground",
        ElementKind::Emphasis => "italic",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels_have_distinct_rules() {
        let rules = StyleRules::new();
        assert_ne!(
            rules.class_for(ElementKind::Heading(1)),
            rules.class_for(ElementKind::Heading(2))
        );
        assert_eq!(
            rules.class_for(ElementKind::Heading(6)),
            rules.class_for(ElementKind::Heading(9))
        );
    }

    #[test]
    fn test_override_wins() {
        let rules = StyleRules::new().with_override(ElementKind::Paragraph, "lead");
        assert_eq!(rules.class_for(ElementKind::Paragraph), "lead");
        assert_eq!(rules.class_for(ElementKind::Emphasis), "italic");
    }
}
