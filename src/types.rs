use crate::{AttributeListTypes, LabelTypes, SpaceTypes};

/// A ready-made set of token tags, for hosts that don't bring their own.
///
/// The [`Default`] implementations of [`AttributeListTypes`],
/// [`LabelTypes`], and [`SpaceTypes`] for this type assign one variant to
/// each role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Attributes,
    AttributesMarker,
    Attribute,
    AttributeId,
    AttributeIdMarker,
    AttributeIdValue,
    AttributeClass,
    AttributeClassMarker,
    AttributeClassValue,
    AttributeName,
    AttributeInitializer,
    AttributeValueLiteral,
    AttributeValue,
    AttributeValueMarker,
    AttributeValueData,
    Label,
    LabelMarker,
    LabelString,
    ChunkText,
    Whitespace,
    LineEnding,
    LinePrefix,
    LineSuffix,
}

impl Default for SpaceTypes<TokenType> {
    fn default() -> Self {
        Self {
            whitespace: TokenType::Whitespace,
            line_ending: TokenType::LineEnding,
            line_prefix: TokenType::LinePrefix,
            line_suffix: TokenType::LineSuffix,
        }
    }
}

impl Default for AttributeListTypes<TokenType> {
    fn default() -> Self {
        Self {
            attributes: TokenType::Attributes,
            marker: TokenType::AttributesMarker,
            attribute: TokenType::Attribute,
            id: TokenType::AttributeId,
            id_marker: TokenType::AttributeIdMarker,
            id_value: TokenType::AttributeIdValue,
            class: TokenType::AttributeClass,
            class_marker: TokenType::AttributeClassMarker,
            class_value: TokenType::AttributeClassValue,
            name: TokenType::AttributeName,
            initializer: TokenType::AttributeInitializer,
            value_literal: TokenType::AttributeValueLiteral,
            value: TokenType::AttributeValue,
            value_marker: TokenType::AttributeValueMarker,
            value_data: TokenType::AttributeValueData,
            space: SpaceTypes::default(),
        }
    }
}

impl Default for LabelTypes<TokenType> {
    fn default() -> Self {
        Self {
            label: TokenType::Label,
            marker: TokenType::LabelMarker,
            string: TokenType::LabelString,
            chunk: TokenType::ChunkText,
        }
    }
}
