use soroban_sdk::{contracttype, unwrap::UnwrapOptimized, Address, Env, Symbol};

const ADMIN_KEY: &str = "Admin";
const SUPPLY_KEY: &str = "Supply";

#[derive(Clone)]
#[contracttype]
pub enum MockNftDataKey {
    Owner(u32),
}

pub fn has_admin(e: &Env) -> bool {
    e.storage().instance().has(&Symbol::new(e, ADMIN_KEY))
}

pub fn get_admin(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&Symbol::new(e, ADMIN_KEY))
        .unwrap_optimized()
}

pub fn set_admin(e: &Env, admin: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, ADMIN_KEY), admin);
}

pub fn get_total_supply(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&Symbol::new(e, SUPPLY_KEY))
        .unwrap_or(0)
}

pub fn set_total_supply(e: &Env, supply: u32) {
    e.storage()
        .instance()
        .set::<Symbol, u32>(&Symbol::new(e, SUPPLY_KEY), &supply);
}

pub fn get_owner(e: &Env, token_id: u32) -> Option<Address> {
    e.storage()
        .persistent()
        .get::<MockNftDataKey, Address>(&MockNftDataKey::Owner(token_id))
}

pub fn set_owner(e: &Env, token_id: u32, owner: &Address) {
    e.storage()
        .persistent()
        .set::<MockNftDataKey, Address>(&MockNftDataKey::Owner(token_id), owner);
}
