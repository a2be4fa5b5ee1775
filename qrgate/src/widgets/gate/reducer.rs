use iced::Task;
use qrgate_auth::{AccessDecision, AuthState, Identity};

use super::event::{GateEffect, GateEvent, GateIntent};
use super::state::GateState;

/// Reduce a gate intent into state updates and effect events.
pub(crate) fn reduce(
    state: &mut GateState,
    event: GateIntent,
) -> Task<GateEvent> {
    Task::batch(
        transition(state, event)
            .into_iter()
            .map(|effect| Task::done(GateEvent::Effect(effect))),
    )
}

/// Apply `event` to `state` and list the effects it triggers, in order.
pub(crate) fn transition(
    state: &mut GateState,
    event: GateIntent,
) -> Vec<GateEffect> {
    match event {
        GateIntent::AuthChanged(AuthState::Pending) => Vec::new(),
        GateIntent::AuthChanged(AuthState::SignedOut) => {
            if state.sign_out() {
                log::info!("signed out");
                vec![GateEffect::LeftAuthorized]
            } else {
                Vec::new()
            }
        },
        GateIntent::AuthChanged(AuthState::SignedIn(identity)) => {
            signed_in(state, identity)
        },
        GateIntent::DecisionReady {
            request_id,
            decision,
        } => apply_decision(state, request_id, decision),
        GateIntent::SignOutRequested => {
            if !state.session().is_authorized() {
                return Vec::new();
            }
            state.set_signing_out(true);
            vec![GateEffect::SignOut]
        },
        GateIntent::SignOutFinished(Ok(())) => Vec::new(),
        GateIntent::SignOutFinished(Err(message)) => {
            log::warn!("sign-out failed: {message}");
            state.set_signing_out(false);
            Vec::new()
        },
    }
}

fn signed_in(state: &mut GateState, identity: Identity) -> Vec<GateEffect> {
    let already_granted = state.session().is_authorized()
        && state.session().identity() == Some(&identity);
    if already_granted {
        return Vec::new();
    }

    let (request_id, was_authorized) =
        state.begin_verification(identity.clone());
    let verify = GateEffect::VerifyAccess {
        request_id,
        identity,
    };

    if was_authorized {
        vec![GateEffect::LeftAuthorized, verify]
    } else {
        vec![verify]
    }
}

fn apply_decision(
    state: &mut GateState,
    request_id: u64,
    decision: AccessDecision,
) -> Vec<GateEffect> {
    if !state.take_pending(request_id) {
        log::debug!("ignoring stale access decision #{request_id}");
        return Vec::new();
    }

    match decision {
        AccessDecision::Authorized(identity) => {
            state.grant(identity.clone());
            vec![GateEffect::Authorized(identity)]
        },
        refused => {
            state.refuse(refused.message().unwrap_or_default());
            vec![GateEffect::ForceSignOut]
        },
    }
}

#[cfg(test)]
mod tests {
    use qrgate_auth::FAULT_MESSAGE;

    use super::*;
    use crate::widgets::gate::model::GatePhase;

    fn ada() -> Identity {
        Identity::new("ada@example.com")
    }

    fn verify(state: &mut GateState, identity: Identity) -> u64 {
        let effects = transition(
            state,
            GateIntent::AuthChanged(AuthState::SignedIn(identity)),
        );
        assert_eq!(force_sign_outs(&effects), 0);
        state.pending_request().expect("lookup should be pending")
    }

    fn decide(
        state: &mut GateState,
        request_id: u64,
        decision: AccessDecision,
    ) -> Vec<GateEffect> {
        transition(
            state,
            GateIntent::DecisionReady {
                request_id,
                decision,
            },
        )
    }

    fn force_sign_outs(effects: &[GateEffect]) -> usize {
        effects
            .iter()
            .filter(|effect| matches!(effect, GateEffect::ForceSignOut))
            .count()
    }

    #[test]
    fn given_fresh_gate_when_viewed_then_phase_is_loading() {
        let state = GateState::default();

        assert_eq!(state.phase(), GatePhase::Loading);
    }

    #[test]
    fn given_signed_out_report_when_reduced_then_sign_in_is_shown() {
        let mut state = GateState::default();

        let _task =
            reduce(&mut state, GateIntent::AuthChanged(AuthState::SignedOut));

        assert_eq!(state.phase(), GatePhase::SignedOut { error: None });
    }

    #[test]
    fn given_signed_in_report_when_reduced_then_lookup_starts_and_phase_waits()
    {
        let mut state = GateState::default();

        let request_id = verify(&mut state, ada());

        assert_eq!(request_id, 1);
        assert!(state.is_verifying());
        assert_eq!(state.phase(), GatePhase::Loading);
    }

    #[test]
    fn given_authorized_decision_when_reduced_then_session_is_granted() {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());

        decide(&mut state, request_id, AccessDecision::Authorized(ada()));

        assert_eq!(state.phase(), GatePhase::Authorized(&ada()));
        assert!(state.session().is_authorized());
        assert_eq!(state.session().error(), None);
        assert!(!state.is_verifying());
    }

    #[test]
    fn given_denied_decision_when_reduced_then_error_names_the_email() {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());

        decide(
            &mut state,
            request_id,
            AccessDecision::Denied {
                email: String::from("ada@example.com"),
            },
        );

        assert_eq!(
            state.phase(),
            GatePhase::SignedOut {
                error: Some(
                    "Access denied. The email ada@example.com is not \
                     authorized."
                )
            }
        );
        assert!(state.session().identity().is_none());
    }

    #[test]
    fn given_fault_decision_when_reduced_then_generic_error_is_shown() {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());

        decide(
            &mut state,
            request_id,
            AccessDecision::Fault {
                reason: String::from("HTTP 503"),
            },
        );

        assert_eq!(
            state.phase(),
            GatePhase::SignedOut {
                error: Some(FAULT_MESSAGE)
            }
        );
    }

    #[test]
    fn given_denial_when_provider_signs_out_then_error_is_kept() {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());
        decide(
            &mut state,
            request_id,
            AccessDecision::Denied {
                email: String::from("ada@example.com"),
            },
        );

        let _task =
            reduce(&mut state, GateIntent::AuthChanged(AuthState::SignedOut));

        assert!(matches!(
            state.phase(),
            GatePhase::SignedOut { error: Some(_) }
        ));
    }

    #[test]
    fn given_stale_decision_when_reduced_then_state_is_unchanged() {
        let mut state = GateState::default();
        let stale = verify(&mut state, ada());
        let grace = Identity::new("grace@example.com");
        let latest = verify(&mut state, grace.clone());

        decide(&mut state, stale, AccessDecision::Authorized(ada()));

        assert_eq!(state.pending_request(), Some(latest));
        assert_eq!(state.phase(), GatePhase::Loading);

        decide(&mut state, latest, AccessDecision::Authorized(grace.clone()));

        assert_eq!(state.phase(), GatePhase::Authorized(&grace));
    }

    #[test]
    fn given_sign_out_during_lookup_when_decision_arrives_then_it_is_ignored()
    {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());
        let _task =
            reduce(&mut state, GateIntent::AuthChanged(AuthState::SignedOut));

        decide(&mut state, request_id, AccessDecision::Authorized(ada()));

        assert_eq!(state.phase(), GatePhase::SignedOut { error: None });
    }

    #[test]
    fn given_authorized_session_when_sign_out_requested_then_phase_is_loading()
    {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());
        decide(&mut state, request_id, AccessDecision::Authorized(ada()));

        let _task = reduce(&mut state, GateIntent::SignOutRequested);
        assert_eq!(state.phase(), GatePhase::Loading);

        let _task =
            reduce(&mut state, GateIntent::AuthChanged(AuthState::SignedOut));
        assert_eq!(state.phase(), GatePhase::SignedOut { error: None });
    }

    #[test]
    fn given_failed_sign_out_when_reduced_then_session_stays_authorized() {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());
        decide(&mut state, request_id, AccessDecision::Authorized(ada()));
        let _task = reduce(&mut state, GateIntent::SignOutRequested);

        let _task = reduce(
            &mut state,
            GateIntent::SignOutFinished(Err(String::from("offline"))),
        );

        assert_eq!(state.phase(), GatePhase::Authorized(&ada()));
    }

    #[test]
    fn given_signed_out_gate_when_sign_out_requested_then_nothing_happens() {
        let mut state = GateState::default();
        let _task =
            reduce(&mut state, GateIntent::AuthChanged(AuthState::SignedOut));

        let _task = reduce(&mut state, GateIntent::SignOutRequested);

        assert_eq!(state.phase(), GatePhase::SignedOut { error: None });
    }

    #[test]
    fn given_same_identity_reported_again_when_authorized_then_no_new_lookup()
    {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());
        decide(&mut state, request_id, AccessDecision::Authorized(ada()));

        let _task = reduce(
            &mut state,
            GateIntent::AuthChanged(AuthState::SignedIn(ada())),
        );

        assert!(!state.is_verifying());
        assert_eq!(state.phase(), GatePhase::Authorized(&ada()));
    }

    #[test]
    fn given_authorized_decision_when_applied_then_no_forced_sign_out() {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());

        let effects =
            decide(&mut state, request_id, AccessDecision::Authorized(ada()));

        assert_eq!(effects, vec![GateEffect::Authorized(ada())]);
        assert_eq!(force_sign_outs(&effects), 0);
    }

    #[test]
    fn given_denied_decision_when_applied_then_sign_out_is_forced_once() {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());

        let effects = decide(
            &mut state,
            request_id,
            AccessDecision::Denied {
                email: String::from("ada@example.com"),
            },
        );

        assert_eq!(effects, vec![GateEffect::ForceSignOut]);
    }

    #[test]
    fn given_fault_decision_when_applied_then_sign_out_is_forced_once() {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());

        let effects = decide(
            &mut state,
            request_id,
            AccessDecision::Fault {
                reason: String::from("HTTP 403"),
            },
        );

        assert_eq!(force_sign_outs(&effects), 1);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn given_stale_refusal_when_applied_then_no_sign_out_is_forced() {
        let mut state = GateState::default();
        let stale = verify(&mut state, ada());
        let _latest = verify(&mut state, Identity::new("grace@example.com"));

        let effects = decide(
            &mut state,
            stale,
            AccessDecision::Denied {
                email: String::from("ada@example.com"),
            },
        );

        assert!(effects.is_empty());
    }

    #[test]
    fn given_repeated_decision_when_applied_then_refusal_acts_once() {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());
        let denied = AccessDecision::Denied {
            email: String::from("ada@example.com"),
        };

        let first = decide(&mut state, request_id, denied.clone());
        let second = decide(&mut state, request_id, denied);

        assert_eq!(force_sign_outs(&first), 1);
        assert_eq!(force_sign_outs(&second), 0);
    }

    #[test]
    fn given_authorized_session_when_signed_out_then_view_is_left_once() {
        let mut state = GateState::default();
        let request_id = verify(&mut state, ada());
        let _effects =
            decide(&mut state, request_id, AccessDecision::Authorized(ada()));

        let effects = transition(
            &mut state,
            GateIntent::AuthChanged(AuthState::SignedOut),
        );

        assert_eq!(effects, vec![GateEffect::LeftAuthorized]);
    }
}
