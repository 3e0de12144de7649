use crate::core::catalog::Catalog;
use crate::domain::model::{ItemKind, KitchenDetails, PropertyType, Quote, SelectionItem};
use crate::domain::selection::{KitchenSelection, KitchenSize, RoomRef, RoomSelection, Selections};
use crate::utils::currency::round_amount;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

/// Prices a selection snapshot against the catalog. Holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct QuoteCalculator<'a> {
    catalog: &'a Catalog,
}

impl<'a> QuoteCalculator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn recompute(&self, selections: &Selections) -> Quote {
        self.recompute_at(selections, Utc::now())
    }

    /// Items come out bedrooms first (ascending), then the living room, then
    /// kitchens (ascending); slots within a room keep their declared order.
    pub fn recompute_at(&self, selections: &Selections, generated_at: DateTime<Utc>) -> Quote {
        let mut items = Vec::new();

        for (index, room) in selections.bedrooms.iter().enumerate() {
            self.collect_room(RoomRef::Bedroom(index + 1), room, &mut items);
        }

        self.collect_room(RoomRef::LivingRoom, &selections.living_room, &mut items);

        for (index, kitchen) in selections.kitchens.iter().enumerate() {
            let number = index + 1;
            match self.price_kitchen(number, kitchen) {
                Ok(Some(item)) => items.push(item),
                Ok(None) => {}
                Err(e) => tracing::warn!("Kitchen {} skipped: {}", number, e),
            }
        }

        // accumulate unrounded, round once
        let total = round_amount(items.iter().map(|item| item.cost).sum());

        tracing::debug!("Recomputed quote: {} items, total {}", items.len(), total);

        Quote {
            items,
            total,
            generated_at,
            property_type: selections.property_type.unwrap_or(PropertyType::Custom),
        }
    }

    fn collect_room(
        &self,
        room: RoomRef,
        selection: &RoomSelection,
        items: &mut Vec<SelectionItem>,
    ) {
        let label = room.label();
        for &category in room.slots() {
            let Some(slot) = selection.slot(category) else {
                continue;
            };
            if !slot.included {
                continue;
            }
            let Some(variant) = slot.variant.as_deref().filter(|v| !v.is_empty()) else {
                tracing::debug!("{} {} included without a size, skipped", label, category);
                continue;
            };

            match self.catalog.lookup(category, variant) {
                Ok(entry) => items.push(SelectionItem {
                    category: ItemKind::Furniture(category),
                    room: label.clone(),
                    cost: entry.unit_price,
                    size: entry.label.clone(),
                    details: None,
                }),
                Err(e) => tracing::warn!("{} {} skipped: {}", label, category, e),
            }
        }
    }

    /// `Ok(None)` when the kitchen has no length or no type chosen yet.
    pub fn price_kitchen(
        &self,
        number: usize,
        kitchen: &KitchenSelection,
    ) -> Result<Option<SelectionItem>> {
        let (Some(size), Some(kitchen_type)) = (&kitchen.size, kitchen.kitchen_type.as_deref())
        else {
            return Ok(None);
        };

        let length = match size {
            KitchenSize::Standard(key) => self.catalog.standard_size(key)?.length,
            KitchenSize::Custom(length) => *length,
        };

        let rule = self.catalog.kitchen();
        let cost = self.catalog.kitchen_cost(length, kitchen_type)?;
        let tier = rule.tier(kitchen_type)?;
        let area = rule.area_sq_meter(length);

        Ok(Some(SelectionItem {
            category: ItemKind::Kitchen,
            room: format!("Kitchen {}", number),
            cost,
            size: format!(
                "Length: {}cm, Height: {}cm, Area: {:.2} sq.m ({})",
                length, rule.standard_height, area, tier.label
            ),
            details: Some(KitchenDetails {
                length,
                height: rule.standard_height,
                area_sq_meter: area,
                kitchen_type: tier.key.clone(),
                price_per_sq_meter: tier.price_per_sq_meter,
            }),
        }))
    }
}
