pub mod view_model;

use leptos::prelude::*;

use crate::shared::modal::Modal;
use view_model::RoomTypeDetailsViewModel;

fn parse_i64(value: &str) -> i64 {
    value.trim().parse().unwrap_or_default()
}

fn parse_f64(value: &str) -> f64 {
    value.trim().parse().unwrap_or_default()
}

/// Create/edit dialog of a room type
#[component]
pub fn RoomTypeDetails(
    id: Option<i64>,
    on_saved: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = RoomTypeDetailsViewModel::new();
    vm.load_if_needed(id);
    let form = vm.form;

    let title = if id.is_some() {
        "Edit room type".to_string()
    } else {
        "New room type".to_string()
    };

    view! {
        <Modal title=title on_close=on_close>
            {move || vm.error.get().map(|e| view! { <div class="error-message">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="rt_name">"Name"</label>
                    <input
                        type="text"
                        id="rt_name"
                        prop:value=move || form.get().name
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="rt_adults">"Adults"</label>
                        <input
                            type="number"
                            id="rt_adults"
                            min="0"
                            prop:value=move || form.get().adults.to_string()
                            on:input=move |ev| form.update(|f| f.adults = parse_i64(&event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label for="rt_children">"Children"</label>
                        <input
                            type="number"
                            id="rt_children"
                            min="0"
                            prop:value=move || form.get().children.to_string()
                            on:input=move |ev| form.update(|f| f.children = parse_i64(&event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label for="rt_guests">"Guests"</label>
                        <input
                            type="number"
                            id="rt_guests"
                            min="0"
                            prop:value=move || form.get().guests.to_string()
                            on:input=move |ev| form.update(|f| f.guests = parse_i64(&event_target_value(&ev)))
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label for="rt_description">"Description"</label>
                    <textarea
                        id="rt_description"
                        rows="3"
                        prop:value=move || form.get().description
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="rt_area">"Size"</label>
                        <input
                            type="number"
                            id="rt_area"
                            min="0"
                            step="any"
                            prop:value=move || form.get().size.area.to_string()
                            on:input=move |ev| form.update(|f| f.size.area = parse_f64(&event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label for="rt_unit">"Unit"</label>
                        <input
                            type="text"
                            id="rt_unit"
                            prop:value=move || form.get().size.unit
                            on:input=move |ev| form.update(|f| f.size.unit = event_target_value(&ev))
                        />
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="rt_base_price">"Base price"</label>
                        <input
                            type="number"
                            id="rt_base_price"
                            min="0"
                            step="0.01"
                            prop:value=move || form.get().pricing.base_price.to_string()
                            on:input=move |ev| form.update(|f| f.pricing.base_price = parse_f64(&event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label for="rt_tax_price">"Tax"</label>
                        <input
                            type="number"
                            id="rt_tax_price"
                            min="0"
                            step="0.01"
                            prop:value=move || form.get().pricing.tax_price.to_string()
                            on:input=move |ev| form.update(|f| f.pricing.tax_price = parse_f64(&event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label for="rt_total_price">"Total"</label>
                        <input
                            type="number"
                            id="rt_total_price"
                            min="0"
                            step="0.01"
                            prop:value=move || form.get().pricing.total_price.to_string()
                            on:input=move |ev| form.update(|f| f.pricing.total_price = parse_f64(&event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label for="rt_currency">"Currency"</label>
                        <input
                            type="text"
                            id="rt_currency"
                            prop:value=move || form.get().pricing.currency
                            on:input=move |ev| form.update(|f| f.pricing.currency = event_target_value(&ev))
                        />
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="rt_available">"Available rooms"</label>
                        <input
                            type="number"
                            id="rt_available"
                            min="0"
                            prop:value=move || form.get().availability.available_rooms.to_string()
                            on:input=move |ev| form.update(|f| f.availability.available_rooms = parse_i64(&event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label for="rt_status">"Status"</label>
                        <input
                            type="text"
                            id="rt_status"
                            prop:value=move || form.get().availability.status
                            on:input=move |ev| form.update(|f| f.availability.status = event_target_value(&ev))
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label for="rt_amenities">"Amenities (comma separated)"</label>
                    <input
                        type="text"
                        id="rt_amenities"
                        prop:value=move || vm.amenities_text.get()
                        on:input=move |ev| vm.amenities_text.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="rt_rooms">"Room numbers (comma separated)"</label>
                    <input
                        type="text"
                        id="rt_rooms"
                        placeholder="101, 102, 103"
                        prop:value=move || vm.room_numbers_text.get()
                        on:input=move |ev| vm.room_numbers_text.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="rt_package">"Package"</label>
                    <input
                        type="text"
                        id="rt_package"
                        prop:value=move || form.get().package_name.unwrap_or_default()
                        on:input=move |ev| form.update(|f| f.package_name = Some(event_target_value(&ev)))
                    />
                </div>

                <div class="form-group">
                    <label for="rt_refund">"Refund policy"</label>
                    <input
                        type="text"
                        id="rt_refund"
                        prop:value=move || form.get().refund_policy.unwrap_or_default()
                        on:input=move |ev| form.update(|f| f.refund_policy = Some(event_target_value(&ev)))
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="button button--primary"
                    disabled=move || vm.saving.get()
                    on:click=move |_| vm.save_command(on_saved)
                >
                    {move || if vm.is_edit_mode() { "Save" } else { "Create" }}
                </button>
                <button class="button button--secondary" on:click=move |_| on_close.run(())>
                    "Cancel"
                </button>
            </div>
        </Modal>
    }
}
