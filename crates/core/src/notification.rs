//! Notification types derived from metric definitions.
//!
//! Each metric with a `notification` block contributes two types,
//! `<metric>_problem` and `<metric>_recovery`, registered once at startup.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::metric_config::{MetricConfig, NotificationLevel, NotificationTemplate};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationType {
    pub name: String,
    pub verbose_name: String,
    pub verb: String,
    pub level: NotificationLevel,
    pub email_subject: String,
    pub message: String,
}

impl NotificationType {
    fn from_template(name: String, template: &NotificationTemplate) -> Self {
        Self {
            name,
            verbose_name: template.verbose_name.clone(),
            verb: template.verb.clone(),
            level: template.level,
            email_subject: template.email_subject.clone(),
            message: template.message.clone(),
        }
    }
}

/// Registered notification types, keyed by name.
#[derive(Debug, Default)]
pub struct NotificationTypeRegistry {
    types: BTreeMap<String, NotificationType>,
}

impl NotificationTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a notification type. Names are unique.
    pub fn register(&mut self, notification_type: NotificationType) -> Result<(), CoreError> {
        if self.types.contains_key(&notification_type.name) {
            return Err(CoreError::Conflict(format!(
                "notification type '{}' is already registered",
                notification_type.name
            )));
        }
        self.types
            .insert(notification_type.name.clone(), notification_type);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NotificationType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

/// Register the problem/recovery notification types of one metric.
///
/// Returns the number of types registered; metrics without a
/// `notification` block register nothing.
pub fn register_metric_notifications(
    registry: &mut NotificationTypeRegistry,
    metric_name: &str,
    config: &MetricConfig,
) -> Result<usize, CoreError> {
    let Some(notifications) = &config.notification else {
        return Ok(0);
    };

    registry.register(NotificationType::from_template(
        format!("{metric_name}_problem"),
        &notifications.problem,
    ))?;
    registry.register(NotificationType::from_template(
        format!("{metric_name}_recovery"),
        &notifications.recovery,
    ))?;

    Ok(2)
}
