//! Tests for trigger dispatch.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::{DeathCause, DeathRequest};
    use crate::components::{Appearance, Checkpoint, Hazard, RespawnAnchor, RespawnPoint};
    use crate::triggers::{
        apply_checkpoint_visibility, dispatch_trigger, CheckpointActivated, TriggerContacts,
        TriggerEntered, TriggerHandler, TriggerResponse,
    };

    fn dispatch_app() -> App {
        let mut app = App::new();
        app.add_event::<TriggerEntered>()
            .add_event::<CheckpointActivated>()
            .add_event::<DeathRequest>()
            .add_systems(
                Update,
                (dispatch_trigger::<Checkpoint>, dispatch_trigger::<Hazard>).chain(),
            );
        app
    }

    fn drain<E: Event + Clone>(app: &mut App) -> Vec<E> {
        app.world_mut()
            .resource_mut::<Events<E>>()
            .drain()
            .collect()
    }

    #[test]
    fn test_contacts_report_only_new_zones() {
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let mut contacts = TriggerContacts::default();

        assert_eq!(contacts.update(vec![a]), vec![a]);
        assert!(contacts.update(vec![a]).is_empty());
        assert_eq!(contacts.update(vec![a, b]), vec![b]);
        // Вышли из a и вошли снова → снова enter
        assert!(contacts.update(vec![b]).is_empty());
        assert_eq!(contacts.update(vec![a, b]), vec![a]);
    }

    #[test]
    fn test_handler_responses() {
        let zone = Entity::from_raw(5);
        assert_eq!(
            Checkpoint::default().on_character_enter(zone),
            TriggerResponse::SetRespawn(RespawnAnchor::Checkpoint(zone))
        );
        assert_eq!(
            Hazard.on_character_enter(zone),
            TriggerResponse::Kill(DeathCause::Hazard)
        );
    }

    #[test]
    fn test_checkpoint_sets_respawn_point_last_writer_wins() {
        let mut app = dispatch_app();
        let character = app.world_mut().spawn(RespawnPoint::at_spawn(Vec2::ZERO)).id();
        let first = app.world_mut().spawn(Checkpoint::default()).id();
        let second = app.world_mut().spawn(Checkpoint::default()).id();

        app.world_mut().send_event(TriggerEntered { character, zone: first });
        app.world_mut().send_event(TriggerEntered { character, zone: second });
        app.update();

        let point = app.world().get::<RespawnPoint>(character).unwrap();
        assert_eq!(point.anchor, RespawnAnchor::Checkpoint(second));
        assert_eq!(drain::<CheckpointActivated>(&mut app).len(), 2);
    }

    #[test]
    fn test_repeated_checkpoint_touch_is_idempotent() {
        let mut app = dispatch_app();
        let character = app.world_mut().spawn(RespawnPoint::at_spawn(Vec2::ZERO)).id();
        let checkpoint = app.world_mut().spawn(Checkpoint::default()).id();

        let mut activations = 0;
        for _ in 0..3 {
            app.world_mut().send_event(TriggerEntered { character, zone: checkpoint });
            app.update();
            activations += drain::<CheckpointActivated>(&mut app).len();
        }

        let point = app.world().get::<RespawnPoint>(character).unwrap();
        assert_eq!(point.anchor, RespawnAnchor::Checkpoint(checkpoint));
        // Активация только при реальной смене
        assert_eq!(activations, 1);
    }

    #[test]
    fn test_hazard_requests_death() {
        let mut app = dispatch_app();
        let character = app.world_mut().spawn(RespawnPoint::default()).id();
        let hazard = app.world_mut().spawn(Hazard).id();

        app.world_mut().send_event(TriggerEntered { character, zone: hazard });
        app.update();

        let deaths = drain::<DeathRequest>(&mut app);
        assert_eq!(
            deaths,
            vec![DeathRequest {
                entity: character,
                cause: DeathCause::Hazard
            }]
        );
        // Hazard не трогает respawn point
        let point = app.world().get::<RespawnPoint>(character).unwrap();
        assert_eq!(point.anchor, RespawnAnchor::Spawn(Vec2::ZERO));
    }

    #[test]
    fn test_invisible_checkpoint_hides_appearance() {
        let mut app = App::new();
        app.add_systems(Update, apply_checkpoint_visibility);

        let hidden = app.world_mut().spawn(Checkpoint { visible: false }).id();
        let shown = app.world_mut().spawn(Checkpoint { visible: true }).id();
        app.update();

        assert!(!app.world().get::<Appearance>(hidden).unwrap().visible);
        assert!(app.world().get::<Appearance>(shown).unwrap().visible);
    }
}
