#![forbid(unsafe_code)]

#[cfg(test)]
mod catalog_contract;
#[cfg(test)]
mod layout_contract;
#[cfg(test)]
mod packer_contract;
#[cfg(test)]
mod settings_contract;
