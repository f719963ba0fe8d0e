//! Board coordinator: the single entry point for board intents.
//!
//! # Responsibility
//! - Check the access policy, delegate to the card repository and the
//!   registries, and hand back immutable snapshots.
//! - Persist the membership list after every membership change.
//!
//! # Invariants
//! - One intent is one synchronous, atomic step. Validation precedes
//!   mutation, so a failed intent leaves state untouched.
//! - Membership writes are best-effort: store failures are logged and the
//!   in-memory registry stays authoritative.
//! - Every intent emits exactly one outcome log event.

use crate::clock::{Clock, SystemClock};
use crate::config::{BoardConfig, ConfigError, SeedMember};
use crate::error::{BoardError, BoardResult, ValidationError};
use crate::filter::{visible_cards, ThemeFilter};
use crate::model::card::{Card, CardId, CardInput, Direction};
use crate::model::column::ColumnId;
use crate::model::member::{Member, MemberId, Role};
use crate::policy::ensure_can_mutate;
use crate::registry::membership_registry::{MemberAddition, MembershipRegistry};
use crate::registry::theme_registry::{ThemeRegistration, ThemeRegistry};
use crate::repo::card_repo::{CardRepository, ReorderOutcome};
use crate::service::intent::BoardIntent;
use crate::service::snapshot::{capture, BoardSnapshot, SnapshotParts};
use crate::store::KeyValueStore;
use log::{debug, info, warn};
use uuid::Uuid;

/// Identity the coordinator acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// A bare role, e.g. a local session without a member record.
    Role(Role),
    /// A board member; the role is looked up on every intent.
    Member(MemberId),
}

/// Composes the board components behind intent handlers.
pub struct BoardCoordinator<S: KeyValueStore, C: Clock = SystemClock> {
    title: String,
    membership_key: String,
    cards: CardRepository,
    themes: ThemeRegistry,
    members: MembershipRegistry,
    filter: ThemeFilter,
    actor: Actor,
    store: S,
    clock: C,
}

impl<S: KeyValueStore> BoardCoordinator<S> {
    /// Builds a board from `config`, loading membership from `store`.
    pub fn open(config: BoardConfig, store: S) -> Result<Self, ConfigError> {
        Self::open_with_clock(config, store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> BoardCoordinator<S, C> {
    /// Builds a board with an explicit time source.
    ///
    /// The session starts acting as `Role::Admin`.
    pub fn open_with_clock(config: BoardConfig, store: S, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let themes =
            ThemeRegistry::with_themes(&config.themes).map_err(|_| ConfigError::BlankTheme)?;
        let mut cards = CardRepository::new(config.columns);
        let now = clock.now_ms();
        for (index, input) in config.seed_cards.into_iter().enumerate() {
            let card = Card::from_input(Uuid::new_v4(), input, now);
            cards
                .add_card(card, &themes, now)
                .map_err(|source| ConfigError::InvalidSeedCard { index, source })?;
        }
        let members = load_members(&store, &config.membership_key, &config.default_members);

        info!(
            "event=board_open module=board status=ok columns={} themes={} members={} cards={}",
            cards.columns().len(),
            themes.len(),
            members.len(),
            cards.len()
        );

        Ok(Self {
            title: config.title,
            membership_key: config.membership_key,
            cards,
            themes,
            members,
            filter: ThemeFilter::new(),
            actor: Actor::Role(Role::Admin),
            store,
            clock,
        })
    }

    /// Applies one intent and returns the resulting snapshot.
    pub fn dispatch(&mut self, intent: BoardIntent) -> BoardResult<BoardSnapshot> {
        debug!(
            "event=intent_dispatch module=board status=start intent={} mutating={}",
            intent.name(),
            intent.is_mutating()
        );
        match intent {
            BoardIntent::AddCard { card } => {
                self.add_card(card)?;
            }
            BoardIntent::UpdateCard { card } => {
                self.update_card(card)?;
            }
            BoardIntent::DeleteCard { card_id } => {
                self.delete_card(card_id)?;
            }
            BoardIntent::MoveCard {
                card_id,
                target_column,
            } => {
                self.move_card(card_id, target_column)?;
            }
            BoardIntent::ReorderWithinColumn { card_id, direction } => {
                self.reorder_within_column(card_id, direction)?;
            }
            BoardIntent::ToggleThemeFilter { theme } => {
                self.toggle_theme_filter(&theme)?;
            }
            BoardIntent::CreateTheme { name } => {
                self.create_theme(&name)?;
            }
            BoardIntent::AddMember { email, role } => {
                self.add_member(&email, role)?;
            }
            BoardIntent::SetRole { member_id, role } => {
                self.set_role(member_id, role)?;
            }
            BoardIntent::RemoveMember { member_id } => {
                self.remove_member(member_id)?;
            }
            BoardIntent::ReplaceMembers { members } => {
                self.replace_members(members)?;
            }
        }
        Ok(self.snapshot())
    }

    /// Adds a card with a fresh id at the end of the board sequence.
    pub fn add_card(&mut self, input: CardInput) -> BoardResult<Card> {
        const INTENT: &str = BoardIntent::ADD_CARD;
        self.authorize(INTENT)?;

        let now = self.clock.now_ms();
        let card = Card::from_input(Uuid::new_v4(), input, now);
        let stored = self
            .cards
            .add_card(card, &self.themes, now)
            .cloned()
            .map_err(|err| log_rejected(INTENT, err))?;

        info!(
            "event=card_add module=board status=ok card_id={} column={} total={}",
            stored.id,
            stored.column,
            self.cards.len()
        );
        Ok(stored)
    }

    /// Replaces a card's full state (everything but id and creation time).
    pub fn update_card(&mut self, card: Card) -> BoardResult<Card> {
        const INTENT: &str = BoardIntent::UPDATE_CARD;
        self.authorize(INTENT)?;

        let now = self.clock.now_ms();
        let stored = self
            .cards
            .update_card(card, &self.themes, now)
            .cloned()
            .map_err(|err| log_rejected(INTENT, err))?;

        info!(
            "event=card_update module=board status=ok card_id={} column={}",
            stored.id, stored.column
        );
        Ok(stored)
    }

    pub fn delete_card(&mut self, id: CardId) -> BoardResult<Card> {
        const INTENT: &str = BoardIntent::DELETE_CARD;
        self.authorize(INTENT)?;

        let removed = self
            .cards
            .delete_card(id)
            .map_err(|err| log_rejected(INTENT, err))?;

        info!(
            "event=card_delete module=board status=ok card_id={} total={}",
            removed.id,
            self.cards.len()
        );
        Ok(removed)
    }

    /// Moves a card to another column, keeping its sequence position.
    pub fn move_card(&mut self, id: CardId, target: impl Into<ColumnId>) -> BoardResult<Card> {
        const INTENT: &str = BoardIntent::MOVE_CARD;
        self.authorize(INTENT)?;

        let now = self.clock.now_ms();
        let moved = self
            .cards
            .move_card(id, target.into(), now)
            .cloned()
            .map_err(|err| log_rejected(INTENT, err))?;

        info!(
            "event=card_move module=board status=ok card_id={} column={}",
            moved.id, moved.column
        );
        Ok(moved)
    }

    pub fn reorder_within_column(
        &mut self,
        id: CardId,
        direction: Direction,
    ) -> BoardResult<ReorderOutcome> {
        const INTENT: &str = BoardIntent::REORDER_WITHIN_COLUMN;
        self.authorize(INTENT)?;

        let outcome = self
            .cards
            .reorder_within_column(id, direction)
            .map_err(|err| log_rejected(INTENT, err))?;

        match outcome {
            ReorderOutcome::Swapped { with } => info!(
                "event=card_reorder module=board status=ok card_id={id} direction={} swapped_with={with}",
                direction.as_str()
            ),
            ReorderOutcome::Unchanged => info!(
                "event=card_reorder module=board status=noop card_id={id} direction={}",
                direction.as_str()
            ),
        }
        Ok(outcome)
    }

    /// Switches a theme filter on or off. Open to every role.
    ///
    /// Returns `true` when the theme is now active.
    pub fn toggle_theme_filter(&mut self, theme: &str) -> BoardResult<bool> {
        const INTENT: &str = BoardIntent::TOGGLE_THEME_FILTER;
        let canonical = match self.themes.canonical(theme) {
            Some(label) => label.to_string(),
            None => {
                let err = ValidationError::UnknownTheme(theme.trim().to_string());
                return Err(log_rejected(INTENT, err.into()));
            }
        };

        let active = self.filter.toggle(&canonical);
        info!(
            "event=filter_toggle module=board status=ok theme={canonical} active={active} active_count={}",
            self.filter.active().len()
        );
        Ok(active)
    }

    /// Clears every active theme filter.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
        info!("event=filter_clear module=board status=ok");
    }

    /// Registers a theme; an existing case-insensitive match is a no-op.
    pub fn create_theme(&mut self, name: &str) -> BoardResult<ThemeRegistration> {
        const INTENT: &str = BoardIntent::CREATE_THEME;
        self.authorize(INTENT)?;

        let registration = self
            .themes
            .register_theme(name)
            .map_err(|err| log_rejected(INTENT, err.into()))?;

        let status = if registration.is_added() { "ok" } else { "noop" };
        info!(
            "event=theme_create module=board status={status} theme={} themes={}",
            registration.label(),
            self.themes.len()
        );
        Ok(registration)
    }

    /// Adds a member; an existing case-insensitive e-mail is a no-op.
    pub fn add_member(&mut self, email: &str, role: Role) -> BoardResult<MemberAddition> {
        const INTENT: &str = BoardIntent::ADD_MEMBER;
        self.authorize(INTENT)?;

        let addition = self
            .members
            .add_member(email, role)
            .map_err(|err| log_rejected(INTENT, err.into()))?;

        match addition {
            MemberAddition::Added(id) => {
                info!("event=member_add module=board status=ok member_id={id} role={role}");
                self.persist_members();
            }
            MemberAddition::Existing(id) => {
                info!("event=member_add module=board status=noop member_id={id}");
            }
        }
        Ok(addition)
    }

    pub fn set_role(&mut self, id: MemberId, role: Role) -> BoardResult<()> {
        const INTENT: &str = BoardIntent::SET_ROLE;
        self.authorize(INTENT)?;

        self.members
            .set_role(id, role)
            .map_err(|err| log_rejected(INTENT, err))?;

        info!(
            "event=member_set_role module=board status=ok member_id={id} role={role} admins={}",
            self.members.admin_count()
        );
        self.persist_members();
        Ok(())
    }

    /// Removes a member. Removing the last admin is allowed.
    pub fn remove_member(&mut self, id: MemberId) -> BoardResult<Member> {
        const INTENT: &str = BoardIntent::REMOVE_MEMBER;
        self.authorize(INTENT)?;

        let removed = self
            .members
            .remove_member(id)
            .map_err(|err| log_rejected(INTENT, err))?;

        let admins = self.members.admin_count();
        if admins == 0 {
            warn!("event=member_remove module=board status=ok member_id={id} admins=0");
        } else {
            info!("event=member_remove module=board status=ok member_id={id} admins={admins}");
        }
        self.persist_members();
        Ok(removed)
    }

    /// Replaces the whole member list, as a saved share dialog does.
    pub fn replace_members(&mut self, members: Vec<Member>) -> BoardResult<()> {
        const INTENT: &str = BoardIntent::REPLACE_MEMBERS;
        self.authorize(INTENT)?;

        self.members
            .replace_members(members)
            .map_err(|err| log_rejected(INTENT, err.into()))?;

        info!(
            "event=member_replace module=board status=ok members={} admins={}",
            self.members.len(),
            self.members.admin_count()
        );
        self.persist_members();
        Ok(())
    }

    /// Acts as a bare role from now on.
    pub fn act_as_role(&mut self, role: Role) {
        self.actor = Actor::Role(role);
        debug!("event=actor_switch module=board status=ok role={role}");
    }

    /// Acts as an existing member from now on.
    pub fn act_as_member(&mut self, id: MemberId) -> BoardResult<()> {
        if self.members.get(id).is_none() {
            return Err(BoardError::MemberNotFound(id));
        }
        self.actor = Actor::Member(id);
        debug!("event=actor_switch module=board status=ok member_id={id}");
        Ok(())
    }

    pub fn actor(&self) -> Actor {
        self.actor
    }

    /// Role the current actor holds right now. A member that no longer
    /// exists acts as a viewer.
    pub fn effective_role(&self) -> Role {
        match self.actor {
            Actor::Role(role) => role,
            Actor::Member(id) => self
                .members
                .get(id)
                .map_or(Role::Viewer, |member| member.role),
        }
    }

    /// Immutable view of the board as the actor currently sees it.
    pub fn snapshot(&self) -> BoardSnapshot {
        capture(SnapshotParts {
            title: &self.title,
            cards: &self.cards,
            themes: &self.themes,
            filter: &self.filter,
            members: self.members.members(),
            role: self.effective_role(),
        })
    }

    /// Cards that pass the active filters, in board order.
    pub fn visible_cards(&self) -> Vec<&Card> {
        visible_cards(self.cards.cards(), self.filter.active())
    }

    pub fn cards(&self) -> &[Card] {
        self.cards.cards()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    pub fn members(&self) -> &[Member] {
        self.members.members()
    }

    pub fn active_filters(&self) -> &[String] {
        self.filter.active()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn authorize(&self, intent: &'static str) -> BoardResult<()> {
        ensure_can_mutate(self.effective_role(), intent)
    }

    fn persist_members(&self) {
        let value = match serde_json::to_value(self.members.members()) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=membership_persist module=store status=error error_code=encode_failed error={err}"
                );
                return;
            }
        };

        match self.store.set(&self.membership_key, &value) {
            Ok(()) => debug!(
                "event=membership_persist module=store status=ok members={}",
                self.members.len()
            ),
            Err(err) => warn!(
                "event=membership_persist module=store status=error error_code=store_write_failed error={err}"
            ),
        }
    }
}

fn load_members<S: KeyValueStore>(
    store: &S,
    key: &str,
    seeds: &[SeedMember],
) -> MembershipRegistry {
    let seeded = || {
        MembershipRegistry::from_members(
            seeds
                .iter()
                .map(|seed| Member::new(seed.email.trim(), seed.role))
                .collect(),
        )
    };

    match store.get(key) {
        Ok(Some(value)) => match serde_json::from_value::<Vec<Member>>(value) {
            Ok(members) => {
                let registry = MembershipRegistry::from_members(members);
                info!(
                    "event=membership_load module=store status=ok source=store members={}",
                    registry.len()
                );
                registry
            }
            Err(err) => {
                warn!(
                    "event=membership_load module=store status=error source=seed error_code=decode_failed error={err}"
                );
                seeded()
            }
        },
        Ok(None) => {
            info!("event=membership_load module=store status=ok source=seed");
            seeded()
        }
        Err(err) => {
            warn!(
                "event=membership_load module=store status=error source=seed error_code=store_read_failed error={err}"
            );
            seeded()
        }
    }
}

fn log_rejected(intent: &'static str, err: BoardError) -> BoardError {
    info!(
        "event=intent_rejected module=board status=error intent={intent} error_code={} error={err}",
        err.code()
    );
    err
}
