use crate::core::calculator::QuoteCalculator;
use crate::core::catalog::Catalog;
use crate::domain::model::{Category, PropertyType, Quote, RoomLayout};
use crate::domain::selection::{
    KitchenSelection, RoomRef, SelectionChange, Selections, SlotSelection,
};
use crate::utils::currency::MoneyFormat;
use crate::utils::error::{QuoteError, Result};

/// The one mutable quote session of a user.
///
/// Every input event goes through [`QuoteSession::on_selection_changed`], which
/// validates the change, applies it to the snapshot and returns the recomputed
/// quote. A rejected change leaves the session untouched.
pub struct QuoteSession<'a> {
    calculator: QuoteCalculator<'a>,
    money: MoneyFormat,
    selections: Selections,
    current: Quote,
}

impl<'a> QuoteSession<'a> {
    pub fn new(catalog: &'a Catalog, money: MoneyFormat) -> Self {
        Self::with_selections(catalog, money, Selections::default())
    }

    pub fn with_selections(
        catalog: &'a Catalog,
        money: MoneyFormat,
        mut selections: Selections,
    ) -> Self {
        Self::apply_fixed_layout(&mut selections);
        let calculator = QuoteCalculator::new(catalog);
        let current = calculator.recompute(&selections);
        Self {
            calculator,
            money,
            selections,
            current,
        }
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn quote(&self) -> &Quote {
        &self.current
    }

    pub fn on_selection_changed(&mut self, change: SelectionChange) -> Result<&Quote> {
        tracing::debug!("Selection changed: {:?}", change);

        match change {
            SelectionChange::SetPropertyType { property_type } => {
                self.set_property_type(property_type)
            }
            SelectionChange::SetRoomCounts { bedrooms, kitchens } => {
                self.set_room_counts(RoomLayout { bedrooms, kitchens })?
            }
            SelectionChange::ToggleSlot {
                room,
                category,
                included,
            } => {
                let slot = self.slot_mut(room, category)?;
                slot.included = included;
                if !included {
                    slot.variant = None;
                }
            }
            SelectionChange::ChooseVariant {
                room,
                category,
                variant,
            } => {
                self.slot_mut(room, category)?.variant = variant;
            }
            SelectionChange::ChooseKitchenSize { kitchen, size } => {
                self.kitchen_mut(kitchen)?.size = size;
            }
            SelectionChange::ChooseKitchenType {
                kitchen,
                kitchen_type,
            } => {
                self.kitchen_mut(kitchen)?.kitchen_type = kitchen_type;
            }
        }

        self.current = self.calculator.recompute(&self.selections);
        Ok(&self.current)
    }

    /// Apartment snapshots are forced onto their fixed layout; extra rooms are dropped.
    fn apply_fixed_layout(selections: &mut Selections) {
        let Some(property_type) = selections.property_type else {
            return;
        };
        let Some(layout) = property_type.fixed_layout() else {
            return;
        };
        if selections.layout() != layout {
            tracing::warn!(
                "Snapshot layout {:?} does not fit a {} property, using {:?}",
                selections.layout(),
                property_type,
                layout
            );
            selections.resize(layout);
        }
    }

    fn set_property_type(&mut self, property_type: Option<PropertyType>) {
        match property_type {
            Some(property_type) => {
                self.selections.property_type = Some(property_type);
                if let Some(layout) = property_type.default_layout() {
                    self.selections.resize(layout);
                }
            }
            None => {
                tracing::debug!("Property type cleared, resetting selections");
                self.selections = Selections::default();
            }
        }
    }

    fn set_room_counts(&mut self, layout: RoomLayout) -> Result<()> {
        if let Some(property_type) = self.selections.property_type {
            if property_type.fixed_layout().is_some() {
                return Err(QuoteError::LayoutLocked {
                    property_type: property_type.to_string(),
                });
            }
        }
        self.selections.resize(layout);
        Ok(())
    }

    fn slot_mut(
        &mut self,
        room: RoomRef,
        category: Category,
    ) -> Result<&mut SlotSelection> {
        if !room.slots().contains(&category) {
            return Err(QuoteError::InvalidSelection {
                message: format!("{} has no {} slot", room.label(), category),
            });
        }
        let selection = self
            .selections
            .room_mut(room)
            .ok_or_else(|| QuoteError::InvalidSelection {
                message: format!("{} does not exist", room.label()),
            })?;
        Ok(selection.slot_mut(category))
    }

    fn kitchen_mut(&mut self, number: usize) -> Result<&mut KitchenSelection> {
        self.selections
            .kitchen_mut(number)
            .ok_or_else(|| QuoteError::InvalidSelection {
                message: format!("Kitchen {} does not exist", number),
            })
    }

    /// Localized, rounded total for display.
    pub fn display_total(&self) -> String {
        self.money.format_rounded(self.current.total)
    }

    /// A freshly stamped quote for the document renderer.
    pub fn request_quote(&self) -> Result<Quote> {
        let quote = self.calculator.recompute(&self.selections);
        if quote.is_empty() {
            tracing::warn!("Quote requested with no items selected");
            return Err(QuoteError::EmptyQuote);
        }
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::EstimatorConfig;
    use crate::domain::selection::KitchenSize;

    fn catalog() -> Catalog {
        Catalog::from_config(&EstimatorConfig::embedded().unwrap()).unwrap()
    }

    fn include(room: RoomRef, category: Category, variant: &str) -> [SelectionChange; 2] {
        [
            SelectionChange::ToggleSlot {
                room,
                category,
                included: true,
            },
            SelectionChange::ChooseVariant {
                room,
                category,
                variant: Some(variant.to_string()),
            },
        ]
    }

    #[test]
    fn test_apartment_sets_layout() {
        let catalog = catalog();
        let mut session = QuoteSession::new(&catalog, MoneyFormat::default());

        session
            .on_selection_changed(SelectionChange::SetPropertyType {
                property_type: Some(PropertyType::ThreeBhk),
            })
            .unwrap();

        assert_eq!(
            session.selections().layout(),
            RoomLayout {
                bedrooms: 3,
                kitchens: 1
            }
        );
    }

    #[test]
    fn test_apartment_layout_is_locked() {
        let catalog = catalog();
        let mut session = QuoteSession::new(&catalog, MoneyFormat::default());
        session
            .on_selection_changed(SelectionChange::SetPropertyType {
                property_type: Some(PropertyType::TwoBhk),
            })
            .unwrap();

        let result = session.on_selection_changed(SelectionChange::SetRoomCounts {
            bedrooms: 5,
            kitchens: 2,
        });
        assert!(matches!(result, Err(QuoteError::LayoutLocked { .. })));
        assert_eq!(session.selections().layout().bedrooms, 2);
    }

    #[test]
    fn test_loaded_apartment_snapshot_keeps_fixed_layout() {
        let catalog = catalog();
        let selections: Selections = serde_json::from_str(
            r#"{
                "propertyType": "1bhk",
                "bedrooms": [
                    {},
                    {},
                    {"slots": [{"category": "bed", "included": true, "variant": "king"}]}
                ],
                "kitchens": [{}, {}, {}]
            }"#,
        )
        .unwrap();

        let session = QuoteSession::with_selections(&catalog, MoneyFormat::default(), selections);

        assert_eq!(
            session.selections().layout(),
            RoomLayout {
                bedrooms: 1,
                kitchens: 1
            }
        );
        assert!(session.quote().items.is_empty());
        assert_eq!(session.quote().total, 0);
    }

    #[test]
    fn test_loaded_individual_snapshot_keeps_its_rooms() {
        let catalog = catalog();
        let selections = Selections {
            property_type: Some(PropertyType::Individual),
            bedrooms: vec![Default::default(); 5],
            kitchens: vec![Default::default(); 2],
            ..Default::default()
        };

        let session = QuoteSession::with_selections(&catalog, MoneyFormat::default(), selections);

        assert_eq!(
            session.selections().layout(),
            RoomLayout {
                bedrooms: 5,
                kitchens: 2
            }
        );
    }

    #[test]
    fn test_individual_layout_can_change() {
        let catalog = catalog();
        let mut session = QuoteSession::new(&catalog, MoneyFormat::default());
        session
            .on_selection_changed(SelectionChange::SetPropertyType {
                property_type: Some(PropertyType::Individual),
            })
            .unwrap();
        assert_eq!(session.selections().layout().bedrooms, 3);

        session
            .on_selection_changed(SelectionChange::SetRoomCounts {
                bedrooms: 5,
                kitchens: 2,
            })
            .unwrap();
        assert_eq!(
            session.selections().layout(),
            RoomLayout {
                bedrooms: 5,
                kitchens: 2
            }
        );
    }

    #[test]
    fn test_running_total_follows_changes() {
        let catalog = catalog();
        let mut session = QuoteSession::new(&catalog, MoneyFormat::default());
        session
            .on_selection_changed(SelectionChange::SetPropertyType {
                property_type: Some(PropertyType::OneBhk),
            })
            .unwrap();

        for change in include(RoomRef::Bedroom(1), Category::Cupboard, "twoDoor") {
            session.on_selection_changed(change).unwrap();
        }
        assert_eq!(session.quote().total, 51267);
        assert_eq!(session.display_total(), "Rs. 51,267");

        for change in include(RoomRef::LivingRoom, Category::Sofa, "lShape") {
            session.on_selection_changed(change).unwrap();
        }
        assert_eq!(session.quote().total, 116267);
        assert_eq!(session.display_total(), "Rs. 1,16,267");
    }

    #[test]
    fn test_untick_clears_variant() {
        let catalog = catalog();
        let mut session = QuoteSession::new(&catalog, MoneyFormat::default());
        session
            .on_selection_changed(SelectionChange::SetPropertyType {
                property_type: Some(PropertyType::OneBhk),
            })
            .unwrap();
        for change in include(RoomRef::Bedroom(1), Category::Bed, "king") {
            session.on_selection_changed(change).unwrap();
        }

        let quote = session
            .on_selection_changed(SelectionChange::ToggleSlot {
                room: RoomRef::Bedroom(1),
                category: Category::Bed,
                included: false,
            })
            .unwrap();
        assert!(quote.is_empty());

        // re-ticking does not bring the old size back
        let quote = session
            .on_selection_changed(SelectionChange::ToggleSlot {
                room: RoomRef::Bedroom(1),
                category: Category::Bed,
                included: true,
            })
            .unwrap();
        assert!(quote.is_empty());
    }

    #[test]
    fn test_invalid_room_and_slot_are_rejected() {
        let catalog = catalog();
        let mut session = QuoteSession::new(&catalog, MoneyFormat::default());
        session
            .on_selection_changed(SelectionChange::SetPropertyType {
                property_type: Some(PropertyType::OneBhk),
            })
            .unwrap();
        let before = session.selections().clone();

        let missing_room = session.on_selection_changed(SelectionChange::ToggleSlot {
            room: RoomRef::Bedroom(2),
            category: Category::Bed,
            included: true,
        });
        assert!(matches!(missing_room, Err(QuoteError::InvalidSelection { .. })));

        let wrong_slot = session.on_selection_changed(SelectionChange::ToggleSlot {
            room: RoomRef::LivingRoom,
            category: Category::Wardrobe,
            included: true,
        });
        assert!(matches!(wrong_slot, Err(QuoteError::InvalidSelection { .. })));

        let missing_kitchen = session.on_selection_changed(SelectionChange::ChooseKitchenType {
            kitchen: 2,
            kitchen_type: Some("modular".to_string()),
        });
        assert!(matches!(missing_kitchen, Err(QuoteError::InvalidSelection { .. })));

        assert_eq!(session.selections(), &before);
    }

    #[test]
    fn test_kitchen_changes_price_the_kitchen() {
        let catalog = catalog();
        let mut session = QuoteSession::new(&catalog, MoneyFormat::default());
        session
            .on_selection_changed(SelectionChange::SetPropertyType {
                property_type: Some(PropertyType::OneBhk),
            })
            .unwrap();
        session
            .on_selection_changed(SelectionChange::ChooseKitchenType {
                kitchen: 1,
                kitchen_type: Some("modular".to_string()),
            })
            .unwrap();
        let quote = session
            .on_selection_changed(SelectionChange::ChooseKitchenSize {
                kitchen: 1,
                size: Some(KitchenSize::Standard("250".to_string())),
            })
            .unwrap();
        assert_eq!(quote.total, 66306);

        // a too-short custom length drops the kitchen without failing the change
        let quote = session
            .on_selection_changed(SelectionChange::ChooseKitchenSize {
                kitchen: 1,
                size: Some(KitchenSize::Custom(50.0)),
            })
            .unwrap();
        assert!(quote.is_empty());
    }

    #[test]
    fn test_clearing_property_type_resets_everything() {
        let catalog = catalog();
        let mut session = QuoteSession::new(&catalog, MoneyFormat::default());
        session
            .on_selection_changed(SelectionChange::SetPropertyType {
                property_type: Some(PropertyType::TwoBhk),
            })
            .unwrap();
        for change in include(RoomRef::Bedroom(2), Category::Bed, "queen") {
            session.on_selection_changed(change).unwrap();
        }

        let quote = session
            .on_selection_changed(SelectionChange::SetPropertyType {
                property_type: None,
            })
            .unwrap();
        assert!(quote.is_empty());
        assert_eq!(session.selections(), &Selections::default());
        assert_eq!(session.display_total(), "Rs. 0");
    }

    #[test]
    fn test_empty_quote_request_is_rejected() {
        let catalog = catalog();
        let session = QuoteSession::new(&catalog, MoneyFormat::default());
        assert!(matches!(session.request_quote(), Err(QuoteError::EmptyQuote)));
    }

    #[test]
    fn test_quote_request_reports_property_type() {
        let catalog = catalog();
        let mut session = QuoteSession::new(&catalog, MoneyFormat::default());
        session
            .on_selection_changed(SelectionChange::SetPropertyType {
                property_type: Some(PropertyType::FourBhk),
            })
            .unwrap();
        for change in include(RoomRef::Bedroom(4), Category::StudyTable, "lShape") {
            session.on_selection_changed(change).unwrap();
        }

        let quote = session.request_quote().unwrap();
        assert_eq!(quote.property_type, PropertyType::FourBhk);
        assert_eq!(quote.items[0].room, "Bedroom 4");
        assert_eq!(quote.total, 35000);
    }
}
