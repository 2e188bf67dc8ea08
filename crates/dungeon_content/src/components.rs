//! Entity components exposed to the DSL.
//!
//! Every component belongs to an entity. The owning entity is a context
//! member: the interpreter supplies it when a script attaches the component,
//! so scripts never name it.

use dungeon_foundation::{Callback, EntityId, HostObject, Result, Value};
use dungeon_semantic::{DslType, InstanceArgs, MemberDescriptor, MemberRole, Shape, TypeDescriptor};

use crate::animation::Animation;

// =============================================================================
// VelocityComponent
// =============================================================================

/// Stores how fast an entity moves and how it looks while moving.
#[derive(Clone, Debug, PartialEq)]
pub struct VelocityComponent {
    entity: EntityId,
    x_velocity: f64,
    y_velocity: f64,
    current_x_velocity: f64,
    current_y_velocity: f64,
    move_left_animation: Animation,
    move_right_animation: Animation,
}

impl VelocityComponent {
    /// Creates a resting component with placeholder animations.
    #[must_use]
    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            x_velocity: 0.0,
            y_velocity: 0.0,
            current_x_velocity: 0.0,
            current_y_velocity: 0.0,
            move_left_animation: Animation::missing_texture(),
            move_right_animation: Animation::missing_texture(),
        }
    }

    fn from_args(args: &InstanceArgs) -> Result<HostObject> {
        let mut component = Self::new(args.context_entity("entity")?);
        component.x_velocity = args.float_or("x_velocity", 0.0)?;
        component.y_velocity = args.float_or("y_velocity", 0.0)?;
        if args.contains("move_left_animation") {
            component.move_left_animation = args.object("move_left_animation")?;
        }
        if args.contains("move_right_animation") {
            component.move_right_animation = args.object("move_right_animation")?;
        }
        Ok(HostObject::new(component))
    }

    /// The owning entity.
    #[must_use]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Speed along the x axis.
    #[must_use]
    pub fn x_velocity(&self) -> f64 {
        self.x_velocity
    }

    /// Speed along the y axis.
    #[must_use]
    pub fn y_velocity(&self) -> f64 {
        self.y_velocity
    }

    /// Current movement along the x axis.
    #[must_use]
    pub fn current_x_velocity(&self) -> f64 {
        self.current_x_velocity
    }

    /// Current movement along the y axis.
    #[must_use]
    pub fn current_y_velocity(&self) -> f64 {
        self.current_y_velocity
    }

    /// Sets the current movement.
    pub fn set_current_velocity(&mut self, x: f64, y: f64) {
        self.current_x_velocity = x;
        self.current_y_velocity = y;
    }

    /// Played while moving left.
    #[must_use]
    pub fn move_left_animation(&self) -> &Animation {
        &self.move_left_animation
    }

    /// Played while moving right.
    #[must_use]
    pub fn move_right_animation(&self) -> &Animation {
        &self.move_right_animation
    }
}

impl DslType for VelocityComponent {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class::<VelocityComponent>()
            .named("velocity_component")
            .context("entity", Shape::Entity)
            .with_member(MemberDescriptor::new("xVelocity", Shape::Float, MemberRole::Literal).named("x_velocity"))
            .with_member(MemberDescriptor::new("yVelocity", Shape::Float, MemberRole::Literal).named("y_velocity"))
            .member("moveRightAnimation", Shape::external::<Animation>())
            .member("moveLeftAnimation", Shape::external::<Animation>())
            .constructor(Self::from_args)
    }
}

// =============================================================================
// HealthComponent
// =============================================================================

/// Tracks hit points and tells a script when they run out.
#[derive(Clone, Debug)]
pub struct HealthComponent {
    entity: EntityId,
    max_health: i64,
    current_health: i64,
    on_death: Option<Callback>,
}

impl HealthComponent {
    fn from_args(args: &InstanceArgs) -> Result<HostObject> {
        let max_health = args.int_or("max_health", 1)?;
        Ok(HostObject::new(Self {
            entity: args.context_entity("entity")?,
            max_health,
            current_health: max_health,
            on_death: args.callback("on_death")?,
        }))
    }

    /// The owning entity.
    #[must_use]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Hit points when fully healed.
    #[must_use]
    pub fn max_health(&self) -> i64 {
        self.max_health
    }

    /// Remaining hit points.
    #[must_use]
    pub fn current_health(&self) -> i64 {
        self.current_health
    }

    /// Returns true once health has dropped to zero.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.current_health <= 0
    }

    /// Subtracts `amount` hit points.
    ///
    /// When health first drops to zero the `on_death` callback, if assigned,
    /// is called with the owning entity.
    ///
    /// # Errors
    ///
    /// Returns whatever error the callback raises.
    pub fn damage(&mut self, amount: i64) -> Result<()> {
        if self.is_dead() {
            return Ok(());
        }
        self.current_health = (self.current_health - amount).max(0);
        if self.is_dead() {
            if let Some(on_death) = &self.on_death {
                on_death.call(&[Value::Entity(self.entity)])?;
            }
        }
        Ok(())
    }
}

impl DslType for HealthComponent {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class::<HealthComponent>()
            .context("entity", Shape::Entity)
            .member("maxHealth", Shape::Int)
            .callback("onDeath", vec![Shape::Entity])
            .constructor(Self::from_args)
    }
}

// =============================================================================
// PositionComponent
// =============================================================================

/// Where an entity stands.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionComponent {
    entity: EntityId,
    x: f64,
    y: f64,
}

impl PositionComponent {
    fn from_args(args: &InstanceArgs) -> Result<HostObject> {
        Ok(HostObject::new(Self {
            entity: args.context_entity("entity")?,
            x: args.float_or("x", 0.0)?,
            y: args.float_or("y", 0.0)?,
        }))
    }

    /// The owning entity.
    #[must_use]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Horizontal coordinate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }
}

impl DslType for PositionComponent {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class::<PositionComponent>()
            .context("entity", Shape::Entity)
            .member("x", Shape::Float)
            .member("y", Shape::Float)
            .constructor(Self::from_args)
    }
}
