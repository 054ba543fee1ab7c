//! HTTP gateway for cardcred (used by the `cardcred` binary and tests).

pub mod gateway;
pub mod health;
