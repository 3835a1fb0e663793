pub mod battle_royale;
